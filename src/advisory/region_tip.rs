use super::{AdvisoryRule, RuleOutcome, WeatherSignals};
use crate::models::Region;

/// Unconditional one-line tip for the agro-ecological zone. Always
/// fires, so every advisory carries at least one line.
pub struct RegionTipRule;

fn tip_for(region: Region) -> &'static str {
    match region {
        Region::CentralHighlands => "Good conditions for coffee and tea",
        Region::RiftValley => "Suitable for wheat and maize cultivation",
        Region::NorthEastern => "Consider drought-resistant crops",
        Region::Coastal => "Good conditions for coconut, cashew and cassava",
        Region::Western => "Reliable rainfall suits maize, sugarcane and beans",
        Region::Eastern => "Favor drought-hardy crops like sorghum and green grams",
    }
}

impl AdvisoryRule for RegionTipRule {
    fn id(&self) -> &'static str {
        "region_tip"
    }

    fn evaluate(&self, signals: &WeatherSignals) -> Option<RuleOutcome> {
        Some(RuleOutcome::tip(tip_for(signals.region)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_region_has_a_tip() {
        for region in Region::all() {
            let signals = WeatherSignals {
                region,
                temperature_c: 24.0,
                humidity_percent: 60.0,
                precipitation_mm: 0.0,
                wind_kph: None,
                uv_index: None,
            };
            let outcome = RegionTipRule.evaluate(&signals).unwrap();
            assert_eq!(outcome.advice.len(), 1);
            assert!(!outcome.advice[0].is_empty());
        }
    }
}
