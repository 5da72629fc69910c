use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, Query, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::health::HealthState;
use crate::api::latency::{track_latency, LatencyStats};
use crate::catalog::CatalogProvider;
use crate::config::{latency, Config};
use crate::error::{AppError, Result};
use crate::orders::place_order;
use crate::pricing::{generate_order_book, generate_price_history};
use crate::search::{FilterForm, SearchFilters};
use crate::state::{MockRng, TradingFloor};
use crate::types::{
    OrderBook, OrderReceipt, OrderRequest, PriceHistory, Product, SortKey, TradingData,
    TradingSnapshot,
};

#[derive(Clone)]
pub struct ApiState {
    pub cfg: Arc<Config>,
    pub catalog: CatalogProvider,
    pub rng: MockRng,
    pub floor: Arc<TradingFloor>,
    pub health: Arc<HealthState>,
    pub latency: Arc<LatencyStats>,
}

pub fn router(state: ApiState) -> Router {
    let latency = Arc::clone(&state.latency);
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
        .route("/products/:id/history", get(get_price_history))
        .route("/products/:id/depth", get(get_market_depth))
        .route("/search", get(quick_search))
        .route("/orders", post(post_order))
        .route(
            "/api/admin/update-prices",
            get(describe_price_updates).post(update_prices),
        )
        .route("/trading", get(get_trading))
        .route("/trading/:id", get(get_instrument))
        .route("/health", get(get_health))
        .route("/stats/latency", get(get_stats_latency))
        .layer(middleware::from_fn_with_state(latency, track_latency))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Query param structs
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TradingQuery {
    pub sort: Option<SortKey>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct PriceUpdateResponse {
    pub success: bool,
    pub message: String,
    pub updated_products: usize,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub catalog_size: usize,
    pub instruments: usize,
    pub ticks: u64,
    pub last_tick_at_ns: Option<u64>,
    pub orders_accepted: u64,
    pub orders_rejected: u64,
    pub price_updates: u64,
}

#[derive(Debug, Serialize)]
pub struct LatencyResponse {
    pub p50_ms: Option<f64>,
    pub p95_ms: Option<f64>,
    pub p99_ms: Option<f64>,
    pub sample_count: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Filter pipeline over the featured catalog. No criteria = full catalog.
async fn list_products(
    State(state): State<ApiState>,
    Query(form): Query<FilterForm>,
) -> Result<Json<Vec<Product>>> {
    let filters = SearchFilters::try_from(form)?;
    let products = state.rng.with(|rng| state.catalog.featured_products(rng));
    let hits = filters.apply(&products);
    if !filters.is_empty() {
        debug!(?filters, hits = hits.len(), "catalog filtered");
    }
    Ok(Json(hits))
}

async fn get_product(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    tokio::time::sleep(state.cfg.delay(latency::PRODUCT_MS)).await;
    let product = state.rng.with(|rng| state.catalog.get_product(&id, rng))?;
    Ok(Json(product))
}

async fn get_price_history(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<PriceHistory>> {
    tokio::time::sleep(state.cfg.delay(latency::HISTORY_MS)).await;
    let today = Utc::now().date_naive();
    let history = state.rng.with(|rng| {
        let product = state.catalog.get_product(&id, rng)?;
        Ok::<_, AppError>(generate_price_history(&product.id, product.product_type, today, rng))
    })?;
    Ok(Json(history))
}

async fn get_market_depth(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<OrderBook>> {
    tokio::time::sleep(state.cfg.delay(latency::DEPTH_MS)).await;
    let now = Utc::now();
    let book = state.rng.with(|rng| {
        let product = state.catalog.get_product(&id, rng)?;
        Ok::<_, AppError>(generate_order_book(&product.id, now, rng))
    })?;
    Ok(Json(book))
}

async fn quick_search(
    State(state): State<ApiState>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<Product>> {
    tokio::time::sleep(state.cfg.delay(latency::SEARCH_MS)).await;
    let query = params.q.unwrap_or_default();
    Json(state.rng.with(|rng| state.catalog.search_products(&query, rng)))
}

async fn post_order(
    State(state): State<ApiState>,
    payload: std::result::Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<OrderReceipt>> {
    tokio::time::sleep(state.cfg.delay(latency::ORDER_MS)).await;
    let Json(req) = payload.map_err(|rejection| {
        state.health.inc_orders_rejected();
        warn!("order body rejected: {}", rejection.body_text());
        AppError::from(rejection)
    })?;
    match state.rng.with(|rng| place_order(&req, Utc::now(), rng)) {
        Ok(receipt) => {
            state.health.inc_orders_accepted();
            info!(
                product_id = %req.product_id,
                side = %req.order_type,
                price = req.price,
                quantity = req.quantity,
                order_id = receipt.order_id.as_deref().unwrap_or_default(),
                "order accepted"
            );
            Ok(Json(receipt))
        }
        Err(e) => {
            state.health.inc_orders_rejected();
            warn!(product_id = %req.product_id, user_id = %req.user_id, "order rejected: {e}");
            Err(e)
        }
    }
}

/// Admin stub: accepts any JSON payload and echoes the product count.
async fn update_prices(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<Json<PriceUpdateResponse>> {
    let payload: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        warn!("Error updating prices: {e}");
        AppError::PriceUpdate(e.to_string())
    })?;

    tokio::time::sleep(state.cfg.delay(latency::ADMIN_UPDATE_MS)).await;
    info!(body = %payload, "price update request");

    let updated_products = payload
        .get("products")
        .and_then(serde_json::Value::as_array)
        .map_or(0, Vec::len);
    state.health.inc_price_updates();

    Ok(Json(PriceUpdateResponse {
        success: true,
        message: "Prices updated successfully".to_string(),
        updated_products,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

async fn describe_price_updates() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Price update API endpoint",
        "methods": ["POST"],
        "description": "Use POST to update product prices"
    }))
}

async fn get_trading(
    State(state): State<ApiState>,
    Query(params): Query<TradingQuery>,
) -> Json<TradingSnapshot> {
    Json(state.floor.snapshot(params.sort.unwrap_or_default()))
}

async fn get_instrument(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<TradingData>> {
    state
        .floor
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::not_found_instrument(&id))
}

async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    let last_tick = state.health.last_tick_at_ns();
    Json(HealthResponse {
        catalog_size: state.catalog.len(),
        instruments: state.floor.len(),
        ticks: state.health.ticks(),
        last_tick_at_ns: (last_tick > 0).then_some(last_tick),
        orders_accepted: state.health.orders_accepted(),
        orders_rejected: state.health.orders_rejected(),
        price_updates: state.health.price_updates(),
    })
}

async fn get_stats_latency(State(state): State<ApiState>) -> Json<LatencyResponse> {
    let (p50, p95, p99) = state.latency.percentiles();
    let to_ms = |us: Option<u64>| us.map(|v| v as f64 / 1000.0);
    Json(LatencyResponse {
        p50_ms: to_ms(p50),
        p95_ms: to_ms(p95),
        p99_ms: to_ms(p99),
        sample_count: state.latency.len(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
