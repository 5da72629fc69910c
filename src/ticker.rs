use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::interval;
use tracing::debug;

use crate::api::health::HealthState;
use crate::state::{MockRng, TradingFloor};

/// Background task that jitters the trading floor on a fixed interval.
/// The tick body is synchronous, so ticks never overlap.
pub struct TradingTicker {
    floor: Arc<TradingFloor>,
    rng: MockRng,
    health: Arc<HealthState>,
    period: Duration,
}

impl TradingTicker {
    pub fn new(
        floor: Arc<TradingFloor>,
        rng: MockRng,
        health: Arc<HealthState>,
        period: Duration,
    ) -> Self {
        Self { floor, rng, health, period }
    }

    pub async fn run(self) {
        let mut ticker = interval(self.period);
        ticker.tick().await; // skip immediate first tick, roster was just seeded

        loop {
            ticker.tick().await;
            self.tick_once();
        }
    }

    fn tick_once(&self) {
        let now = Utc::now();
        self.rng.with(|rng| self.floor.tick(now, rng));
        self.health.record_tick(now.timestamp_nanos_opt().unwrap_or_default() as u64);
        debug!(instruments = self.floor.len(), "trading floor tick");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SortKey;

    #[tokio::test(start_paused = true)]
    async fn ticks_on_the_configured_period() {
        let floor = TradingFloor::new();
        let rng = MockRng::new(Some(4));
        rng.with(|r| floor.seed(Utc::now(), r));
        let before = floor.snapshot(SortKey::Name);

        let health = Arc::new(HealthState::new());
        let ticker = TradingTicker::new(
            Arc::clone(&floor),
            rng,
            Arc::clone(&health),
            Duration::from_secs(5),
        );
        let handle = tokio::spawn(ticker.run());

        tokio::time::sleep(Duration::from_millis(10_500)).await;
        assert_eq!(health.ticks(), 2);
        assert!(health.last_tick_at_ns() > 0);

        let after = floor.snapshot(SortKey::Name);
        let moved = before
            .instruments
            .iter()
            .zip(&after.instruments)
            .any(|(a, b)| a.current_price != b.current_price);
        assert!(moved);

        handle.abort();
    }
}
