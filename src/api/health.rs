//! Shared health state for the /health endpoint.
//! Updated by the trading ticker and the order/admin handlers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Shared health counters. Updated by service components, read by API.
#[derive(Default)]
pub struct HealthState {
    /// Trading floor ticks since startup.
    pub ticks: AtomicU64,
    /// Nanosecond timestamp of the last trading floor tick (0 = none yet).
    pub last_tick_at_ns: AtomicU64,
    /// Orders that passed validation and received an id.
    pub orders_accepted: AtomicU64,
    /// Orders rejected by validation.
    pub orders_rejected: AtomicU64,
    /// Admin price-update requests acknowledged.
    pub price_updates: AtomicU64,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_tick(&self, at_ns: u64) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
        self.last_tick_at_ns.store(at_ns, Ordering::Relaxed);
    }

    pub fn inc_orders_accepted(&self) {
        self.orders_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_orders_rejected(&self) {
        self.orders_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_price_updates(&self) {
        self.price_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn last_tick_at_ns(&self) -> u64 {
        self.last_tick_at_ns.load(Ordering::Relaxed)
    }

    pub fn orders_accepted(&self) -> u64 {
        self.orders_accepted.load(Ordering::Relaxed)
    }

    pub fn orders_rejected(&self) -> u64 {
        self.orders_rejected.load(Ordering::Relaxed)
    }

    pub fn price_updates(&self) -> u64 {
        self.price_updates.load(Ordering::Relaxed)
    }
}
