use super::{
    drought::DroughtRule, frost::FrostRule, humidity::HumidityRule, rainfall::RainfallRule,
    region_tip::RegionTipRule, temperature::TemperatureRule, uv::UvRule, wind::WindRule,
    AdvisoryRule, WeatherSignals,
};
use crate::models::WeatherAlert;

pub struct AdvisoryEngine {
    rules: Vec<Box<dyn AdvisoryRule>>,
}

impl AdvisoryEngine {
    pub fn new() -> Self {
        // Rules are independent, but the output ordering follows this
        // fixed evaluation order.
        let rules: Vec<Box<dyn AdvisoryRule>> = vec![
            Box::new(TemperatureRule),
            Box::new(FrostRule),
            Box::new(RainfallRule),
            Box::new(HumidityRule),
            Box::new(WindRule),
            Box::new(UvRule),
            Box::new(RegionTipRule),
            Box::new(DroughtRule),
        ];

        Self { rules }
    }

    pub fn evaluate(&self, signals: &WeatherSignals) -> (Vec<String>, Vec<WeatherAlert>) {
        let mut advice = Vec::new();
        let mut alerts = Vec::new();
        for rule in &self.rules {
            if let Some(outcome) = rule.evaluate(signals) {
                advice.extend(outcome.advice);
                alerts.extend(outcome.alerts);
            }
        }
        (advice, alerts)
    }

    pub fn list_rules(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }
}

impl Default for AdvisoryEngine {
    fn default() -> Self {
        Self::new()
    }
}
