use super::{AdvisoryRule, RuleOutcome, WeatherSignals};
use crate::models::{AlertKind, WeatherAlert};

/// Rainfall rule
///
/// Three bands: heavy rain threatens waterlogging, moderate rain makes
/// irrigation and spraying wasteful, and a dry hot day calls for
/// irrigation.
pub struct RainfallRule;

impl AdvisoryRule for RainfallRule {
    fn id(&self) -> &'static str {
        "rainfall"
    }

    fn evaluate(&self, signals: &WeatherSignals) -> Option<RuleOutcome> {
        let rain = signals.precipitation_mm;

        if rain > 20.0 {
            return Some(
                RuleOutcome::tip("Heavy rainfall: Check drainage systems").with_alert(
                    WeatherAlert::new(AlertKind::HeavyRain, "Heavy rainfall expected"),
                ),
            );
        }
        if rain > 5.0 {
            return Some(RuleOutcome::tip(
                "Rain expected: Delay irrigation and pesticide application",
            ));
        }
        if rain < 1.0 && signals.temperature_c > 28.0 {
            return Some(RuleOutcome::tip("Dry conditions: Consider irrigation"));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;

    fn signals(precip: f64, temp: f64) -> WeatherSignals {
        WeatherSignals {
            region: Region::Western,
            temperature_c: temp,
            humidity_percent: 60.0,
            precipitation_mm: precip,
            wind_kph: None,
            uv_index: None,
        }
    }

    #[test]
    fn heavy_rain_alerts() {
        let outcome = RainfallRule.evaluate(&signals(25.0, 24.0)).unwrap();
        assert_eq!(outcome.alerts[0].kind, AlertKind::HeavyRain);
    }

    #[test]
    fn moderate_rain_delays_treatment() {
        let outcome = RainfallRule.evaluate(&signals(10.0, 24.0)).unwrap();
        assert!(outcome.advice[0].contains("Delay irrigation"));
        assert!(outcome.alerts.is_empty());
    }

    #[test]
    fn dry_heat_asks_for_irrigation() {
        let outcome = RainfallRule.evaluate(&signals(0.0, 29.0)).unwrap();
        assert!(outcome.advice[0].contains("Consider irrigation"));
    }

    #[test]
    fn dry_cool_day_is_silent() {
        assert!(RainfallRule.evaluate(&signals(0.0, 22.0)).is_none());
    }
}
