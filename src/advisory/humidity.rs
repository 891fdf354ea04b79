use super::{AdvisoryRule, RuleOutcome, WeatherSignals};

/// Sustained humidity above 80% favors fungal pathogens such as coffee
/// berry disease and late blight.
pub struct HumidityRule;

impl AdvisoryRule for HumidityRule {
    fn id(&self) -> &'static str {
        "fungal_risk"
    }

    fn evaluate(&self, signals: &WeatherSignals) -> Option<RuleOutcome> {
        if signals.humidity_percent > 80.0 {
            Some(RuleOutcome::tip(
                "High humidity: Watch for fungal diseases",
            ))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;

    fn signals(humidity: f64) -> WeatherSignals {
        WeatherSignals {
            region: Region::Coastal,
            temperature_c: 26.0,
            humidity_percent: humidity,
            precipitation_mm: 2.0,
            wind_kph: None,
            uv_index: None,
        }
    }

    #[test]
    fn humid_air_warns() {
        assert!(HumidityRule.evaluate(&signals(85.0)).is_some());
    }

    #[test]
    fn dry_air_is_silent() {
        assert!(HumidityRule.evaluate(&signals(80.0)).is_none());
    }
}
