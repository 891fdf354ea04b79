use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTrend {
    Up,
    Down,
    Stable,
}

impl PriceTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTrend::Up => "up",
            PriceTrend::Down => "down",
            PriceTrend::Stable => "stable",
        }
    }
}

impl std::fmt::Display for PriceTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One day of the synthesized trailing price history. The history is
/// illustrative and not anchored to the current quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
    pub volume: u32,
}

/// A model-generated market price. `price` always lies within the
/// crop's base price band after all adjustment factors are applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuote {
    pub crop: String,
    pub price: f64,
    pub currency: String,
    pub unit: String,
    pub market: String,
    pub county: String,
    pub trend: PriceTrend,
    pub seasonal_factor: f64,
    pub regional_factor: f64,
    pub advice: Vec<String>,
    pub history: Vec<PricePoint>,
    pub timestamp: DateTime<Utc>,
}
