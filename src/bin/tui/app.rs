use chrono::{DateTime, Utc};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// API response types (mirror routes.rs / types.rs shapes)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct InstrumentResponse {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub current_price: f64,
    pub price_change24h: f64,
    pub volume24h: u32,
    pub market_cap: f64,
    pub price_history: Vec<f64>,
    pub last_traded: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SnapshotResponse {
    pub total_volume: u64,
    pub active_products: usize,
    pub avg_price_change: f64,
    pub instruments: Vec<InstrumentResponse>,
}

// ---------------------------------------------------------------------------
// App state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionStatus {
    Connected,
    Error(String),
    Connecting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    Price,
    Change,
    #[default]
    Volume,
    Name,
}

impl SortBy {
    pub fn next(self) -> Self {
        match self {
            SortBy::Price => SortBy::Change,
            SortBy::Change => SortBy::Volume,
            SortBy::Volume => SortBy::Name,
            SortBy::Name => SortBy::Price,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortBy::Price => "price",
            SortBy::Change => "change",
            SortBy::Volume => "volume",
            SortBy::Name => "name",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub status: ConnectionStatus,
    pub snapshot: SnapshotResponse,
    pub sort_by: SortBy,
    pub last_refresh: std::time::Instant,
    pub base_url: String,
}

impl AppState {
    pub fn new(base_url: String) -> Self {
        Self {
            status: ConnectionStatus::Connecting,
            snapshot: SnapshotResponse::default(),
            sort_by: SortBy::default(),
            last_refresh: std::time::Instant::now(),
            base_url,
        }
    }

    pub async fn refresh(&mut self, client: &reqwest::Client) {
        let url = format!("{}/trading", self.base_url);
        let resp = match client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                self.status = ConnectionStatus::Error(format!("{e}"));
                return;
            }
        };
        if !resp.status().is_success() {
            self.status = ConnectionStatus::Error(format!("HTTP {}", resp.status()));
            return;
        }
        match resp.json::<SnapshotResponse>().await {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.status = ConnectionStatus::Connected;
                self.last_refresh = std::time::Instant::now();
            }
            Err(e) => {
                self.status = ConnectionStatus::Error(format!("parse error: {e}"));
            }
        }
    }

    /// Roster in the selected order. Recomputed from the current snapshot on
    /// every call.
    pub fn sorted_instruments(&self) -> Vec<&InstrumentResponse> {
        let mut rows: Vec<&InstrumentResponse> = self.snapshot.instruments.iter().collect();
        rows.sort_by(|a, b| match self.sort_by {
            SortBy::Price => b.current_price.total_cmp(&a.current_price),
            SortBy::Change => b.price_change24h.abs().total_cmp(&a.price_change24h.abs()),
            SortBy::Volume => b.volume24h.cmp(&a.volume24h),
            SortBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        });
        rows
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// `$1,234.56`
pub fn format_price(v: f64) -> String {
    let sign = if v < 0.0 { "-" } else { "" };
    let cents = (v.abs() * 100.0).round() as u64;
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

pub fn format_volume(v: u64) -> String {
    group_thousands(v)
}

/// `+1.23%`, `-0.50%`, or `N/A` for non-finite input.
pub fn format_percentage(pct: f64) -> String {
    if !pct.is_finite() {
        return "N/A".to_string();
    }
    let sign = if pct >= 0.0 { "+" } else { "" };
    format!("{sign}{pct:.2}%")
}

/// Arrow for a trend badge. Moves under 0.01% read as flat.
pub fn trend_arrow(pct: f64) -> &'static str {
    if pct.abs() < 0.01 {
        "→"
    } else if pct >= 0.0 {
        "↗"
    } else {
        "↘"
    }
}

pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}

/// Rescale a price series to non-negative cents above its minimum for the
/// sparkline widget.
pub fn sparkline_points(prices: &[f64]) -> Vec<u64> {
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    prices
        .iter()
        .map(|p| ((p - min) * 100.0).round().max(0.0) as u64)
        .collect()
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(",")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn instrument(name: &str, price: f64, change: f64, volume: u32) -> InstrumentResponse {
        InstrumentResponse {
            id: name.to_lowercase(),
            name: name.to_string(),
            symbol: name[..2].to_uppercase(),
            current_price: price,
            price_change24h: change,
            volume24h: volume,
            market_cap: price * 100.0,
            price_history: vec![price],
            last_traded: Utc::now(),
        }
    }

    fn app() -> AppState {
        let mut app = AppState::new("http://localhost:3000".to_string());
        app.snapshot.instruments = vec![
            instrument("Opus", 900.0, -4.0, 12),
            instrument("Dom", 1500.0, 1.0, 40),
            instrument("Hennessy", 700.0, 2.5, 25),
        ];
        app
    }

    fn names(app: &AppState) -> Vec<&str> {
        app.sorted_instruments().iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn sorts_by_each_key() {
        let mut app = app();
        assert_eq!(names(&app), vec!["Dom", "Hennessy", "Opus"]);

        app.sort_by = SortBy::Price;
        assert_eq!(names(&app), vec!["Dom", "Opus", "Hennessy"]);

        app.sort_by = SortBy::Change;
        assert_eq!(names(&app), vec!["Opus", "Hennessy", "Dom"]);

        app.sort_by = SortBy::Name;
        assert_eq!(names(&app), vec!["Dom", "Hennessy", "Opus"]);
    }

    #[test]
    fn sort_cycles_through_all_keys() {
        let mut s = SortBy::Price;
        let mut seen = vec![s];
        for _ in 0..3 {
            s = s.next();
            seen.push(s);
        }
        assert_eq!(s.next(), SortBy::Price);
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn snapshot_json_deserializes() {
        let json = r#"{
            "sort": "volume", "total_volume": 42, "active_products": 1, "avg_price_change": 1.5,
            "instruments": [{
                "id": "trading-0", "name": "Opus One 2018", "symbol": "OP18",
                "currentPrice": 812.5, "priceChange24h": 1.5, "volume24h": 42,
                "marketCap": 81250.0, "priceHistory": [810.0, 812.5],
                "lastTraded": "2024-03-01T12:00:00Z"
            }]
        }"#;
        let snap: SnapshotResponse = serde_json::from_str(json).unwrap();
        assert_eq!(snap.total_volume, 42);
        assert_eq!(snap.instruments[0].symbol, "OP18");
        assert_eq!(snap.instruments[0].price_history.len(), 2);
    }

    #[test]
    fn price_formatting() {
        assert_eq!(format_price(1234.5), "$1,234.50");
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_price(-12.5), "-$12.50");
        assert_eq!(format_volume(1_234_567), "1,234,567");
    }

    #[test]
    fn percentage_formatting() {
        assert_eq!(format_percentage(1.234), "+1.23%");
        assert_eq!(format_percentage(-0.5), "-0.50%");
        assert_eq!(format_percentage(0.0), "+0.00%");
        assert_eq!(format_percentage(f64::NAN), "N/A");
    }

    #[test]
    fn trend_arrows() {
        assert_eq!(trend_arrow(2.0), "↗");
        assert_eq!(trend_arrow(-2.0), "↘");
        assert_eq!(trend_arrow(0.005), "→");
    }

    #[test]
    fn relative_times() {
        let now = Utc::now();
        assert_eq!(time_ago(now - Duration::seconds(30), now), "Just now");
        assert_eq!(time_ago(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(time_ago(now - Duration::hours(3), now), "3h ago");
        assert_eq!(time_ago(now - Duration::hours(50), now), "2d ago");
    }

    #[test]
    fn sparkline_is_shifted_to_zero() {
        assert_eq!(sparkline_points(&[10.0, 10.5, 10.25]), vec![0, 50, 25]);
        assert!(sparkline_points(&[]).is_empty());
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("Château Margaux", 7), "Châtea…");
        assert_eq!(truncate("Opus", 10), "Opus");
    }
}
