mod api;
mod catalog;
mod config;
mod error;
mod orders;
mod pricing;
mod search;
mod state;
mod ticker;
mod types;

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::api::health::HealthState;
use crate::api::latency::LatencyStats;
use crate::api::routes::{router, ApiState};
use crate::catalog::CatalogProvider;
use crate::config::Config;
use crate::error::Result;
use crate::state::{MockRng, TradingFloor};
use crate::ticker::TradingTicker;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    let rng = MockRng::new(cfg.rng_seed);
    match cfg.rng_seed {
        Some(seed) => info!("Mock data seeded with RNG_SEED={seed}"),
        None => info!("Mock data seeded from entropy"),
    }

    // --- Catalog (stateless; regenerated on every read) ---
    let catalog = CatalogProvider::new();
    info!("Catalog ready: {} featured products", catalog.len());

    // --- Trading floor ---
    let floor = TradingFloor::new();
    rng.with(|r| floor.seed(Utc::now(), r));
    info!("Trading floor seeded with {} instruments", floor.len());

    let health = Arc::new(HealthState::new());
    let latency = Arc::new(LatencyStats::new());

    // Trading ticker (background, every TRADING_TICK_SECS)
    let ticker = TradingTicker::new(
        Arc::clone(&floor),
        rng.clone(),
        Arc::clone(&health),
        cfg.trading_tick,
    );
    info!("Trading ticker every {}s", cfg.trading_tick.as_secs());
    tokio::spawn(async move { ticker.run().await });

    if !cfg.simulate_latency {
        info!("Simulated API latency disabled");
    }

    // HTTP API server
    let api_port = cfg.api_port;
    let api_state = ApiState {
        cfg: Arc::new(cfg),
        catalog,
        rng,
        floor,
        health,
        latency,
    };
    let app = router(api_state);
    let bind_addr = format!("0.0.0.0:{api_port}");
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
