use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Wine,
    Spirits,
}

impl ProductType {
    /// Per-point perturbation bound for synthetic price series.
    /// Wine is the lower volatility class.
    pub fn volatility(self) -> f64 {
        match self {
            ProductType::Wine => 0.02,
            ProductType::Spirits => 0.03,
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProductType::Wine => "wine",
            ProductType::Spirits => "spirits",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wine" => Ok(ProductType::Wine),
            "spirits" => Ok(ProductType::Spirits),
            other => Err(format!("unknown product type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Pending,
    Unverified,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seller {
    pub business_name: String,
    pub verification_status: VerificationStatus,
    pub seller_rating: f64,
    pub license_number: String,
    pub license_state: String,
    pub years_in_business: Option<u32>,
    pub total_sales: Option<u32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
}

/// Display shape of a catalog entry. Random fields are re-rolled on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub producer: String,
    pub region: String,
    pub vintage: Option<i32>,
    pub varietal: Option<String>,
    pub base_price: f64,
    pub current_price: Option<f64>,
    pub available_quantity: u32,
    pub primary_image_url: Option<String>,
    pub description: Option<String>,
    pub tasting_notes: Option<String>,
    pub investment_potential: Option<String>,
    pub featured: bool,
    pub investment_grade: bool,
    #[serde(rename = "fiveYearPriceChangePct")]
    pub five_year_price_change_pct: Option<f64>,
    pub average_rating: Option<f64>,
    pub total_reviews: Option<u32>,
    pub wine_spectator_score: Option<u8>,
    pub robert_parker_score: Option<u8>,
    pub james_suckling_score: Option<u8>,
    pub price_change_24h: Option<f64>,
    pub last_traded_price: Option<f64>,
    pub price_range_52week: Option<PriceRange>,
    pub volume_ml: Option<u32>,
    pub alcohol_content: Option<f64>,
    pub rarity_score: Option<u8>,
    pub food_pairings: Vec<String>,
    pub serving_temperature: Option<String>,
    pub aging_potential: Option<String>,
    pub vineyard_location: Option<String>,
    pub estate_history: Option<String>,
    pub production_methods: Option<String>,
    pub certifications: Vec<String>,
    pub seller: Seller,
    pub slug: Option<String>,
    pub shipping_restrictions: Option<Vec<String>>,
}

impl Product {
    /// Price used for filtering and display: current if known, else base.
    pub fn effective_price(&self) -> f64 {
        self.current_price.unwrap_or(self.base_price)
    }
}

// ---------------------------------------------------------------------------
// Price history
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
    pub volume: Option<u32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    pub current: f64,
    pub change24h: f64,
    pub change7d: f64,
    pub change30d: f64,
    pub high52w: f64,
    pub low52w: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistory {
    pub product_id: String,
    pub points: Vec<PricePoint>,
    pub summary: PriceSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceChange {
    pub amount: f64,
    pub percentage: f64,
    pub direction: Direction,
}

// ---------------------------------------------------------------------------
// Order book
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookEntry {
    pub price: f64,
    pub quantity: u32,
    pub timestamp: DateTime<Utc>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBook {
    pub product_id: String,
    /// Sorted descending by price; bids[0] is the best bid.
    pub bids: Vec<OrderBookEntry>,
    /// Sorted ascending by price; asks[0] is the best ask.
    pub asks: Vec<OrderBookEntry>,
    pub spread: f64,
    pub last_traded_price: Option<f64>,
    pub volume_24h: u32,
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Bid,
    Ask,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Bid => write!(f, "bid"),
            OrderSide::Ask => write!(f, "ask"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub product_id: String,
    pub user_id: String,
    pub order_type: OrderSide,
    pub price: f64,
    pub quantity: f64,
    pub age_verified: bool,
    pub shipping_state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub success: bool,
    pub order_id: Option<String>,
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Trading floor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingData {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub current_price: f64,
    pub price_change24h: f64,
    pub volume24h: u32,
    pub market_cap: f64,
    /// Rolling window of recent prices, oldest first.
    pub price_history: Vec<f64>,
    pub last_traded: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Price,
    Change,
    #[default]
    Volume,
    Name,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SortKey::Price => "price",
            SortKey::Change => "change",
            SortKey::Volume => "volume",
            SortKey::Name => "name",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingSnapshot {
    pub sort: SortKey,
    pub total_volume: u64,
    pub active_products: usize,
    pub avg_price_change: f64,
    pub instruments: Vec<TradingData>,
}
