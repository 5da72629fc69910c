use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::Rng;

use crate::config::TRADING_HISTORY_LEN;
use crate::types::{SortKey, TradingData, TradingSnapshot};

/// Named instruments listed on the floor, in listing order.
pub const ROSTER: &[(&str, &str)] = &[
    ("Château Lafite Rothschild 2010", "LAF10"),
    ("Dom Pérignon 2013", "DP13"),
    ("Macallan 25 Year Old", "MAC25"),
    ("Screaming Eagle 2019", "SE19"),
    ("Hennessy Paradis", "HP"),
    ("Château Margaux 2015", "MAR15"),
    ("Opus One 2018", "OP18"),
    ("Louis XIII Cognac", "L13"),
];

// ---------------------------------------------------------------------------
// TradingFloor
// ---------------------------------------------------------------------------

/// In-memory roster mutated in place by the ticker. Readers get sorted
/// clones; nothing is persisted.
pub struct TradingFloor {
    /// instrument id → current record
    instruments: DashMap<String, TradingData>,
}

impl TradingFloor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Replace the roster with freshly generated instruments.
    pub fn seed<R: Rng + ?Sized>(&self, now: DateTime<Utc>, rng: &mut R) {
        self.instruments.clear();
        for (index, &(name, symbol)) in ROSTER.iter().enumerate() {
            let data = generate_instrument(index, name, symbol, now, rng);
            self.instruments.insert(data.id.clone(), data);
        }
    }

    /// Jitter every instrument by a small random delta and roll its history.
    pub fn tick<R: Rng + ?Sized>(&self, now: DateTime<Utc>, rng: &mut R) {
        for mut entry in self.instruments.iter_mut() {
            let item = entry.value_mut();
            item.current_price += (rng.gen::<f64>() - 0.5) * 10.0;
            item.price_change24h += (rng.gen::<f64>() - 0.5) * 2.0;
            let volume_delta = ((rng.gen::<f64>() - 0.5) * 5.0).floor() as i64;
            item.volume24h = (i64::from(item.volume24h) + volume_delta).max(1) as u32;
            if rng.gen::<f64>() > 0.8 {
                item.last_traded = now;
            }

            item.price_history.push(item.current_price);
            if item.price_history.len() > TRADING_HISTORY_LEN {
                let excess = item.price_history.len() - TRADING_HISTORY_LEN;
                item.price_history.drain(..excess);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<TradingData> {
        self.instruments.get(id).map(|d| d.clone())
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Current roster sorted by `sort`, plus floor-wide totals.
    pub fn snapshot(&self, sort: SortKey) -> TradingSnapshot {
        let mut instruments: Vec<TradingData> =
            self.instruments.iter().map(|e| e.value().clone()).collect();
        // Listing order first so ties are stable across reads.
        instruments.sort_by_key(|d| listing_index(&d.id));
        sort_instruments(&mut instruments, sort);

        let total_volume = instruments.iter().map(|d| u64::from(d.volume24h)).sum();
        let avg_price_change = if instruments.is_empty() {
            0.0
        } else {
            instruments.iter().map(|d| d.price_change24h).sum::<f64>() / instruments.len() as f64
        };

        TradingSnapshot {
            sort,
            total_volume,
            active_products: instruments.len(),
            avg_price_change,
            instruments,
        }
    }
}

impl Default for TradingFloor {
    fn default() -> Self {
        Self { instruments: DashMap::new() }
    }
}

pub fn sort_instruments(instruments: &mut [TradingData], sort: SortKey) {
    instruments.sort_by(|a, b| match sort {
        SortKey::Price => b.current_price.total_cmp(&a.current_price),
        SortKey::Change => b.price_change24h.abs().total_cmp(&a.price_change24h.abs()),
        SortKey::Volume => b.volume24h.cmp(&a.volume24h),
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    });
}

fn listing_index(id: &str) -> usize {
    id.strip_prefix("trading-")
        .and_then(|n| n.parse().ok())
        .unwrap_or(usize::MAX)
}

fn generate_instrument<R: Rng + ?Sized>(
    index: usize,
    name: &str,
    symbol: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> TradingData {
    let base = 500.0 + index as f64 * 200.0 + rng.gen::<f64>() * 1000.0;
    let price_history = (0..TRADING_HISTORY_LEN)
        .map(|_| base + (rng.gen::<f64>() - 0.5) * 100.0)
        .collect();
    let age_ms = (rng.gen::<f64>() * 3_600_000.0) as i64;

    TradingData {
        id: format!("trading-{index}"),
        name: name.to_string(),
        symbol: symbol.to_string(),
        current_price: base,
        price_change24h: (rng.gen::<f64>() - 0.5) * 10.0,
        volume24h: rng.gen_range(10..60),
        market_cap: base * f64::from(rng.gen_range(100u32..1100)),
        price_history,
        last_traded: now - Duration::milliseconds(age_ms),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
