pub mod drought;
pub mod engine;
pub mod frost;
pub mod humidity;
pub mod rainfall;
pub mod region_tip;
pub mod temperature;
pub mod uv;
pub mod wind;

pub use engine::AdvisoryEngine;

use crate::models::{CurrentConditions, Region, WeatherAlert};

/// Weather signals a rule may test. Optional fields stay `None` for
/// providers that do not report them, and those rules simply pass.
#[derive(Debug, Clone)]
pub struct WeatherSignals {
    pub region: Region,
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub precipitation_mm: f64,
    pub wind_kph: Option<f64>,
    pub uv_index: Option<f64>,
}

impl WeatherSignals {
    pub fn from_current(current: &CurrentConditions, region: Region) -> Self {
        Self {
            region,
            temperature_c: current.temperature_c,
            humidity_percent: current.humidity_percent,
            precipitation_mm: current.precipitation_mm,
            wind_kph: current.wind_kph,
            uv_index: current.uv_index,
        }
    }
}

/// What a fired rule contributes: free-text advice and/or structured
/// alerts.
#[derive(Debug, Default)]
pub struct RuleOutcome {
    pub advice: Vec<String>,
    pub alerts: Vec<WeatherAlert>,
}

impl RuleOutcome {
    pub fn tip(text: impl Into<String>) -> Self {
        Self {
            advice: vec![text.into()],
            alerts: Vec::new(),
        }
    }

    pub fn with_alert(mut self, alert: WeatherAlert) -> Self {
        self.alerts.push(alert);
        self
    }
}

/// Trait for advisory threshold rules. Rules are independent; the
/// engine fires every applicable one.
pub trait AdvisoryRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Evaluate the rule and return its contribution if conditions are met
    fn evaluate(&self, signals: &WeatherSignals) -> Option<RuleOutcome>;
}
