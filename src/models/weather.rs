use super::geo::Region;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Which provider answered a request. `Synthetic` marks a locally
/// computed substitute for unavailable external data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataOrigin {
    WeatherApi,
    OpenMeteo,
    SoilGrids,
    PositionStack,
    OpenElevation,
    PlantId,
    Synthetic,
}

impl DataOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataOrigin::WeatherApi => "WeatherAPI.com",
            DataOrigin::OpenMeteo => "Open-Meteo",
            DataOrigin::SoilGrids => "ISRIC SoilGrids",
            DataOrigin::PositionStack => "PositionStack",
            DataOrigin::OpenElevation => "Open-Elevation",
            DataOrigin::PlantId => "Plant.id",
            DataOrigin::Synthetic => "Synthetic",
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, DataOrigin::Synthetic)
    }
}

impl std::fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    HeatWave,
    HeavyRain,
    DroughtRisk,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::HeatWave => "heat_wave",
            AlertKind::HeavyRain => "heavy_rain",
            AlertKind::DroughtRisk => "drought_risk",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherAlert {
    pub kind: AlertKind,
    pub message: String,
}

impl WeatherAlert {
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Current conditions at a coordinate. Optional fields are omitted by
/// providers that do not report them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub precipitation_mm: f64,
    pub condition: String,
    pub feels_like_c: f64,
    pub wind_kph: Option<f64>,
    pub wind_direction: Option<String>,
    pub pressure_mb: Option<f64>,
    pub uv_index: Option<f64>,
}

/// One day of the 7-day outlook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyOutlook {
    pub date: NaiveDate,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub precipitation_mm: f64,
    pub condition: String,
}

/// Provider-agnostic weather payload returned by a chain attempt,
/// before geographic annotation and advisory derivation.
#[derive(Debug, Clone)]
pub struct WeatherBundle {
    pub current: CurrentConditions,
    pub forecast: Vec<DailyOutlook>,
    pub alerts: Vec<WeatherAlert>,
    /// Free-text administrative region reported by the provider, if any.
    pub provider_region: Option<String>,
    pub location_name: Option<String>,
}

/// Fully-populated weather response for a coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub source: DataOrigin,
    pub timestamp: DateTime<Utc>,
    pub region: Region,
    pub county: String,
    pub season: String,
    pub location_name: Option<String>,
    pub current: CurrentConditions,
    pub forecast: Vec<DailyOutlook>,
    pub alerts: Vec<WeatherAlert>,
    pub farming_advice: Vec<String>,
}
