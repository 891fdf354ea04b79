use super::{AdvisoryRule, RuleOutcome, WeatherSignals};

/// Wind rule. Passes when the provider reports no wind speed.
pub struct WindRule;

impl AdvisoryRule for WindRule {
    fn id(&self) -> &'static str {
        "wind_protection"
    }

    fn evaluate(&self, signals: &WeatherSignals) -> Option<RuleOutcome> {
        let wind = signals.wind_kph?;
        if wind > 20.0 {
            Some(RuleOutcome::tip(
                "Strong winds: Secure young plants and greenhouses",
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

    fn signals(wind_kph: Option<f64>) -> WeatherSignals {
        WeatherSignals {
            region: Region::RiftValley,
            temperature_c: 24.0,
            humidity_percent: 55.0,
            precipitation_mm: 0.0,
            wind_kph,
            uv_index: None,
        }
    }

    #[test]
    fn strong_wind_warns() {
        assert!(WindRule.evaluate(&signals(Some(25.0))).is_some());
    }

    #[test]
    fn missing_wind_passes() {
        assert!(WindRule.evaluate(&signals(None)).is_none());
    }
}
