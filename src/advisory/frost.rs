use super::{AdvisoryRule, RuleOutcome, WeatherSignals};
use crate::models::Region;

/// Cold protection rule
///
/// Only the Central Highlands get cold enough for frost damage to
/// tea, coffee and horticultural seedlings.
pub struct FrostRule;

impl AdvisoryRule for FrostRule {
    fn id(&self) -> &'static str {
        "frost_protection"
    }

    fn evaluate(&self, signals: &WeatherSignals) -> Option<RuleOutcome> {
        if signals.temperature_c < 10.0 && signals.region == Region::CentralHighlands {
            Some(RuleOutcome::tip(
                "Low temperatures: Protect sensitive crops with covers",
            ))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(region: Region, temp: f64) -> WeatherSignals {
        WeatherSignals {
            region,
            temperature_c: temp,
            humidity_percent: 60.0,
            precipitation_mm: 0.0,
            wind_kph: None,
            uv_index: None,
        }
    }

    #[test]
    fn cold_highlands_fire() {
        assert!(FrostRule
            .evaluate(&signals(Region::CentralHighlands, 8.0))
            .is_some());
    }

    #[test]
    fn cold_elsewhere_is_silent() {
        assert!(FrostRule.evaluate(&signals(Region::RiftValley, 8.0)).is_none());
    }

    #[test]
    fn warm_highlands_are_silent() {
        assert!(FrostRule
            .evaluate(&signals(Region::CentralHighlands, 15.0))
            .is_none());
    }
}
