use super::{AdvisoryRule, RuleOutcome, WeatherSignals};

/// UV rule. Only WeatherAPI.com reports a UV index; other tiers pass.
pub struct UvRule;

impl AdvisoryRule for UvRule {
    fn id(&self) -> &'static str {
        "uv_shade"
    }

    fn evaluate(&self, signals: &WeatherSignals) -> Option<RuleOutcome> {
        let uv = signals.uv_index?;
        if uv > 8.0 {
            Some(RuleOutcome::tip(
                "Very high UV: Provide shade for sensitive plants",
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

    fn signals(uv: Option<f64>) -> WeatherSignals {
        WeatherSignals {
            region: Region::Eastern,
            temperature_c: 27.0,
            humidity_percent: 45.0,
            precipitation_mm: 0.0,
            wind_kph: None,
            uv_index: uv,
        }
    }

    #[test]
    fn extreme_uv_warns() {
        assert!(UvRule.evaluate(&signals(Some(9.0))).is_some());
    }

    #[test]
    fn moderate_uv_is_silent() {
        assert!(UvRule.evaluate(&signals(Some(5.0))).is_none());
    }

    #[test]
    fn missing_uv_passes() {
        assert!(UvRule.evaluate(&signals(None)).is_none());
    }
}
