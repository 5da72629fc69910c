use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::config::{ORDER_BOOK_DEPTH, ORDER_BOOK_STEP};
use crate::pricing::history::round2;
use crate::types::{OrderBook, OrderBookEntry, OrderSide};

/// Synthesizes a fresh book around a random base price in [500, 1500).
/// Unrelated to any previous book for the same id.
pub fn generate_order_book<R: Rng + ?Sized>(
    product_id: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> OrderBook {
    let base = 500.0 + rng.gen::<f64>() * 1000.0;
    let bids = ladder(base, OrderSide::Bid, now, rng);
    let asks = ladder(base, OrderSide::Ask, now, rng);
    let spread = match (asks.first(), bids.first()) {
        (Some(ask), Some(bid)) => round2(ask.price - bid.price),
        _ => 0.0,
    };

    OrderBook {
        product_id: product_id.to_string(),
        bids,
        asks,
        spread,
        last_traded_price: Some(base),
        volume_24h: rng.gen_range(10..110),
    }
}

/// Levels step away from `base` by `ORDER_BOOK_STEP` per rank. Bids come back
/// best-first (descending), asks best-first (ascending).
fn ladder<R: Rng + ?Sized>(
    base: f64,
    side: OrderSide,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<OrderBookEntry> {
    let step = base * ORDER_BOOK_STEP;
    let mut levels: Vec<OrderBookEntry> = (1..=ORDER_BOOK_DEPTH)
        .map(|rank| {
            let offset = rank as f64 * step;
            let price = match side {
                OrderSide::Bid => base - offset,
                OrderSide::Ask => base + offset,
            };
            let age_ms = (rng.gen::<f64>() * 3_600_000.0) as i64;
            OrderBookEntry {
                price: round2(price),
                quantity: rng.gen_range(1..=10),
                timestamp: now - Duration::milliseconds(age_ms),
                user_id: Some(format!("user-{}", rng.gen_range(0..1000))),
            }
        })
        .collect();

    match side {
        OrderSide::Bid => levels.sort_by(|a, b| b.price.total_cmp(&a.price)),
        OrderSide::Ask => levels.sort_by(|a, b| a.price.total_cmp(&b.price)),
    }
    levels
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
