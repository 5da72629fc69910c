use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::config::{BASE_PRICE_MAX, BASE_PRICE_MIN, HISTORY_DAYS};
use crate::types::{Direction, PriceChange, PriceHistory, PricePoint, PriceSummary, ProductType};

/// 32-bit rolling hash `h = h * 31 + unit` over UTF-16 code units, wrapped to
/// i32 at every step. Reproduces the demo's mock prices bit-for-bit.
pub fn id_hash(product_id: &str) -> i32 {
    product_id.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
    })
}

/// Stable anchor price for an id, in [BASE_PRICE_MIN, BASE_PRICE_MAX).
pub fn base_price_for(product_id: &str) -> f64 {
    let h = i64::from(id_hash(product_id)).abs();
    (BASE_PRICE_MIN + h % (BASE_PRICE_MAX - BASE_PRICE_MIN)) as f64
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Builds a daily series of `HISTORY_DAYS` points ending on `today`.
///
/// Each point is `base * (1 + r + sin(offset / 10) * 0.01)` where `r` is uniform
/// in `[-volatility, volatility)` and `offset` counts days back from today. The
/// base price is stable per id; the path is not.
pub fn generate_price_history<R: Rng + ?Sized>(
    product_id: &str,
    product_type: ProductType,
    today: NaiveDate,
    rng: &mut R,
) -> PriceHistory {
    let base = base_price_for(product_id);
    let volatility = product_type.volatility();

    let points: Vec<PricePoint> = (0..HISTORY_DAYS)
        .rev()
        .map(|offset| {
            let random_change = rng.gen_range(-volatility..volatility);
            let trend = (offset as f64 / 10.0).sin() * 0.01;
            PricePoint {
                date: today - Duration::days(offset as i64),
                price: round2(base * (1.0 + random_change + trend)),
                volume: Some(rng.gen_range(1..=10)),
            }
        })
        .collect();

    let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
    PriceHistory {
        product_id: product_id.to_string(),
        summary: summarize(&prices),
        points,
    }
}

/// Summary over a price series (oldest first). Lookbacks that run past the
/// start of the series fall back to the current price.
pub fn summarize(prices: &[f64]) -> PriceSummary {
    let Some(&current) = prices.last() else {
        return PriceSummary {
            current: 0.0,
            change24h: 0.0,
            change7d: 0.0,
            change30d: 0.0,
            high52w: 0.0,
            low52w: 0.0,
        };
    };

    let lookback = |days: usize| -> f64 {
        prices
            .len()
            .checked_sub(days + 1)
            .map_or(current, |i| prices[i])
    };

    PriceSummary {
        current,
        change24h: calculate_price_change(current, lookback(1)).percentage,
        change7d: calculate_price_change(current, lookback(7)).percentage,
        change30d: calculate_price_change(current, lookback(30)).percentage,
        high52w: prices.iter().copied().fold(f64::MIN, f64::max),
        low52w: prices.iter().copied().fold(f64::MAX, f64::min),
    }
}

pub fn calculate_price_change(current: f64, previous: f64) -> PriceChange {
    let amount = current - previous;
    let percentage = if previous != 0.0 { amount / previous * 100.0 } else { 0.0 };
    let direction = if amount > 0.0 {
        Direction::Up
    } else if amount < 0.0 {
        Direction::Down
    } else {
        Direction::Flat
    };
    PriceChange { amount, percentage, direction }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
