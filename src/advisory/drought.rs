use super::{AdvisoryRule, RuleOutcome, WeatherSignals};
use crate::models::{AlertKind, Region, WeatherAlert};

/// Drought alert for the arid north-east: hot and rainless conditions
/// there escalate to a structured alert, not just advice.
pub struct DroughtRule;

impl AdvisoryRule for DroughtRule {
    fn id(&self) -> &'static str {
        "drought_watch"
    }

    fn evaluate(&self, signals: &WeatherSignals) -> Option<RuleOutcome> {
        if signals.region == Region::NorthEastern
            && signals.precipitation_mm < 1.0
            && signals.temperature_c > 30.0
        {
            Some(RuleOutcome::default().with_alert(WeatherAlert::new(
                AlertKind::DroughtRisk,
                "Low rainfall expected",
            )))
        } else {
            None
        }
    }
}
