//! In-memory latency histogram for API instrumentation.
//! Records wall time per request, simulated delays included.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{extract::Request, extract::State, middleware::Next, response::Response};

/// Shared latency stats. Middleware records, API reads.
/// Values stored in microseconds.
pub struct LatencyStats {
    inner: Mutex<hdrhistogram::Histogram<u64>>,
}

impl LatencyStats {
    /// Create a new histogram. Tracks 1us to 100s, 3 significant figures.
    pub fn new() -> Self {
        let histogram = hdrhistogram::Histogram::new_with_bounds(1, 100_000_000, 3)
            .expect("valid histogram bounds");
        Self {
            inner: Mutex::new(histogram),
        }
    }

    /// Record a request latency in microseconds.
    pub fn record_us(&self, us: u64) {
        if let Ok(mut h) = self.inner.lock() {
            let _ = h.record(us.max(1));
        }
    }

    pub fn record(&self, d: Duration) {
        let us = d.as_micros().min(u128::from(u64::MAX)) as u64;
        self.record_us(us);
    }

    /// Return (p50_us, p95_us, p99_us). None if no samples.
    pub fn percentiles(&self) -> (Option<u64>, Option<u64>, Option<u64>) {
        let Ok(h) = self.inner.lock() else {
            return (None, None, None);
        };
        if h.len() == 0 {
            return (None, None, None);
        }
        let p50 = h.value_at_quantile(0.5);
        let p95 = h.value_at_quantile(0.95);
        let p99 = h.value_at_quantile(0.99);
        (Some(p50), Some(p95), Some(p99))
    }

    /// Sample count.
    pub fn len(&self) -> u64 {
        self.inner.lock().map(|h| h.len()).unwrap_or(0)
    }
}

impl Default for LatencyStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Axum middleware: time every request into the shared histogram.
pub async fn track_latency(
    State(stats): State<Arc<LatencyStats>>,
    req: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let response = next.run(req).await;
    stats.record(started.elapsed());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_histogram_has_no_percentiles() {
        let stats = LatencyStats::new();
        assert_eq!(stats.len(), 0);
        assert_eq!(stats.percentiles(), (None, None, None));
    }

    #[test]
    fn percentiles_track_recorded_samples() {
        let stats = LatencyStats::new();
        for ms in 1..=100u64 {
            stats.record(Duration::from_millis(ms));
        }
        assert_eq!(stats.len(), 100);
        let (p50, p95, p99) = stats.percentiles();
        let p50 = p50.unwrap();
        assert!((49_000..=51_000).contains(&p50), "p50={p50}");
        assert!(p95.unwrap() >= p50);
        assert!(p99.unwrap() >= p95.unwrap());
    }

    #[test]
    fn zero_duration_is_clamped_into_range() {
        let stats = LatencyStats::new();
        stats.record(Duration::ZERO);
        assert_eq!(stats.len(), 1);
    }
}
