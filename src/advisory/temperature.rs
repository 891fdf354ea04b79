use super::{AdvisoryRule, RuleOutcome, WeatherSignals};
use crate::models::{AlertKind, WeatherAlert};

/// Heat stress rule
///
/// Above 30°C midday irrigation mostly evaporates; above 35°C crops
/// are at risk of heat damage and an alert is raised.
pub struct TemperatureRule;

impl AdvisoryRule for TemperatureRule {
    fn id(&self) -> &'static str {
        "heat_stress"
    }

    fn evaluate(&self, signals: &WeatherSignals) -> Option<RuleOutcome> {
        if signals.temperature_c <= 30.0 {
            return None;
        }

        let mut outcome =
            RuleOutcome::tip("High temperatures: Water crops early morning or late evening");
        if signals.temperature_c > 35.0 {
            outcome = outcome.with_alert(WeatherAlert::new(
                AlertKind::HeatWave,
                "Extreme heat warning",
            ));
        }
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;

    fn signals(temp: f64) -> WeatherSignals {
        WeatherSignals {
            region: Region::Eastern,
            temperature_c: temp,
            humidity_percent: 50.0,
            precipitation_mm: 2.0,
            wind_kph: None,
            uv_index: None,
        }
    }

    #[test]
    fn below_threshold_is_silent() {
        assert!(TemperatureRule.evaluate(&signals(30.0)).is_none());
    }

    #[test]
    fn hot_day_advises_without_alert() {
        let outcome = TemperatureRule.evaluate(&signals(32.0)).unwrap();
        assert_eq!(outcome.advice.len(), 1);
        assert!(outcome.alerts.is_empty());
    }

    #[test]
    fn extreme_heat_raises_alert() {
        let outcome = TemperatureRule.evaluate(&signals(36.0)).unwrap();
        assert_eq!(outcome.alerts[0].kind, AlertKind::HeatWave);
    }
}
