use super::geo::Region;
use super::weather::DataOrigin;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// USDA texture class derived from the clay/sand/silt fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoilTexture {
    Clay,
    Sandy,
    Silt,
    ClayLoam,
    SandyClayLoam,
    Loam,
    SandyLoam,
}

impl SoilTexture {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilTexture::Clay => "Clay",
            SoilTexture::Sandy => "Sandy",
            SoilTexture::Silt => "Silt",
            SoilTexture::ClayLoam => "Clay Loam",
            SoilTexture::SandyClayLoam => "Sandy Clay Loam",
            SoilTexture::Loam => "Loam",
            SoilTexture::SandyLoam => "Sandy Loam",
        }
    }
}

impl std::fmt::Display for SoilTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FertilityClass {
    Low,
    Medium,
    High,
}

impl FertilityClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            FertilityClass::Low => "Low",
            FertilityClass::Medium => "Medium",
            FertilityClass::High => "High",
        }
    }
}

impl std::fmt::Display for FertilityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErosionRisk {
    Low,
    Medium,
    High,
}

impl ErosionRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErosionRisk::Low => "Low",
            ErosionRisk::Medium => "Medium",
            ErosionRisk::High => "High",
        }
    }
}

/// Lime requirement tier, graded from the measured pH.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimingRequirement {
    pub required: bool,
    /// e.g. "1.0-2.0 tons/acre"; absent when not required.
    pub amount: Option<String>,
    /// "Agricultural lime" or "Dolomitic lime"; absent when not required.
    pub lime_type: Option<String>,
    pub reason: Option<String>,
}

impl LimingRequirement {
    pub fn not_required() -> Self {
        Self {
            required: false,
            amount: None,
            lime_type: None,
            reason: Some("pH is optimal".to_string()),
        }
    }

    pub fn required(amount: &str, lime_type: &str) -> Self {
        Self {
            required: true,
            amount: Some(amount.to_string()),
            lime_type: Some(lime_type.to_string()),
            reason: None,
        }
    }
}

/// Point-estimates of soil properties at the surface depth band,
/// as returned by a provider or synthesized.
#[derive(Debug, Clone)]
pub struct SoilReading {
    pub ph: f64,
    pub organic_carbon_percent: f64,
    pub clay_percent: f64,
    pub sand_percent: f64,
    pub silt_percent: f64,
    pub nitrogen_percent: f64,
    /// Cation exchange capacity, cmol(c)/kg.
    pub cec: f64,
    /// Bulk density, g/cm3.
    pub bulk_density: f64,
}

/// Fully-enriched soil characterization for a coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilProfile {
    pub source: DataOrigin,
    pub timestamp: DateTime<Utc>,
    pub region: Region,
    pub county: String,
    pub ph: f64,
    pub organic_carbon_percent: f64,
    pub clay_percent: f64,
    pub sand_percent: f64,
    pub silt_percent: f64,
    pub nitrogen_percent: f64,
    pub cec: f64,
    pub bulk_density: f64,
    pub texture: SoilTexture,
    pub fertility: FertilityClass,
    pub water_holding_capacity: f64,
    pub erosion_risk: ErosionRisk,
    pub liming: LimingRequirement,
    pub fertilizer_recommendations: Vec<String>,
    pub suitable_crops: Vec<String>,
}
