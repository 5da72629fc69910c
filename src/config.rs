use std::time::Duration;

use crate::error::{AppError, Result};

/// Only the first N seed entries are exposed as the featured catalog.
pub const FEATURED_LIMIT: usize = 20;

/// Maximum results returned by the quick search box.
pub const QUICK_SEARCH_LIMIT: usize = 10;

/// Days of synthetic price history per product (oldest first, ending today).
pub const HISTORY_DAYS: usize = 60;

/// Hash-derived base prices fall in [BASE_PRICE_MIN, BASE_PRICE_MAX).
pub const BASE_PRICE_MIN: i64 = 50;
pub const BASE_PRICE_MAX: i64 = 5000;

/// Order book levels per side.
pub const ORDER_BOOK_DEPTH: usize = 5;

/// Distance between adjacent order book levels, as a fraction of the base price.
pub const ORDER_BOOK_STEP: f64 = 0.005;

/// Number of price samples kept per trading floor instrument.
pub const TRADING_HISTORY_LEN: usize = 24;

/// Default trading floor tick interval (seconds).
pub const TRADING_TICK_SECS: u64 = 5;

/// Artificial service delays, mirroring the demo's mock API.
pub mod latency {
    pub const PRODUCT_MS: u64 = 300;
    pub const SEARCH_MS: u64 = 200;
    pub const HISTORY_MS: u64 = 300;
    pub const DEPTH_MS: u64 = 200;
    pub const ORDER_MS: u64 = 500;
    pub const ADMIN_UPDATE_MS: u64 = 500;
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub api_port: u16,
    /// Apply the fixed artificial delays to API calls (SIMULATE_LATENCY)
    pub simulate_latency: bool,
    /// Trading floor tick interval (TRADING_TICK_SECS)
    pub trading_tick: Duration,
    /// Fixed seed for the mock data generator (RNG_SEED). Entropy when unset.
    pub rng_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            simulate_latency: std::env::var("SIMULATE_LATENCY")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            trading_tick: Duration::from_secs(
                std::env::var("TRADING_TICK_SECS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .filter(|&secs| secs > 0)
                    .unwrap_or(TRADING_TICK_SECS),
            ),
            rng_seed: match std::env::var("RNG_SEED") {
                Ok(v) => Some(v.parse::<u64>().map_err(|_| {
                    AppError::Config("RNG_SEED must be an unsigned integer".to_string())
                })?),
                Err(_) => None,
            },
        })
    }

    /// Delay to apply for an operation, or zero when latency simulation is off.
    pub fn delay(&self, millis: u64) -> Duration {
        if self.simulate_latency {
            Duration::from_millis(millis)
        } else {
            Duration::ZERO
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            api_port: 3000,
            simulate_latency: true,
            trading_tick: Duration::from_secs(TRADING_TICK_SECS),
            rng_seed: None,
        }
    }
}

fn parse_flag(v: &str) -> bool {
    !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsing_accepts_common_spellings() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(" OFF "));
        assert!(!parse_flag("0"));
    }

    #[test]
    fn delay_is_zero_when_simulation_disabled() {
        let cfg = Config { simulate_latency: false, ..Config::default() };
        assert_eq!(cfg.delay(latency::ORDER_MS), Duration::ZERO);

        let cfg = Config::default();
        assert_eq!(cfg.delay(latency::ORDER_MS), Duration::from_millis(500));
    }
}
