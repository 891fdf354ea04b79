use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A ranked crop suggestion for a county/soil/rainfall/elevation profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropRecommendation {
    pub crop: String,
    /// Additive affinity score, clamped to [0, 1].
    pub suitability_score: f64,
    pub county_suitable: bool,
    pub season: String,
    /// e.g. "12.0 tons/acre".
    pub estimated_yield: String,
    /// e.g. "KSh 47.50/kg".
    pub market_price: String,
    /// e.g. "KSh 120,000/acre".
    pub estimated_profit: String,
    pub recommended_varieties: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationSchedule {
    pub crop: String,
    pub region: String,
    pub weekly_water_need_mm: f64,
    pub irrigation_frequency_days: u32,
    pub next_irrigation: NaiveDate,
    pub recommended_method: String,
    pub water_saving_tips: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiseaseSeverity {
    None,
    Low,
    Medium,
    High,
}

impl DiseaseSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiseaseSeverity::None => "None",
            DiseaseSeverity::Low => "Low",
            DiseaseSeverity::Medium => "Medium",
            DiseaseSeverity::High => "High",
        }
    }
}

impl std::fmt::Display for DiseaseSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a disease-detection request. Rule/hash-based when the
/// external identification provider is unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseDetection {
    pub source: super::weather::DataOrigin,
    pub crop: String,
    pub disease: String,
    pub symptoms: String,
    pub severity: DiseaseSeverity,
    pub confidence: f64,
    pub is_healthy: bool,
    pub recommendations: Vec<String>,
}
