use crate::catalog;
use crate::models::{IrrigationSchedule, Region};
use chrono::{Days, Utc};

/// Pure irrigation planning: crop water need scaled by region aridity
/// and soil drainage, net of expected rainfall.
pub struct IrrigationService;

impl IrrigationService {
    pub fn new() -> Self {
        Self
    }

    pub fn schedule(
        &self,
        crop: &str,
        region: Region,
        soil_type: &str,
        rainfall_mm_week: f64,
    ) -> IrrigationSchedule {
        let base_need = catalog::weekly_water_need(crop);
        let adjusted = base_need * region_adjustment(region) * soil_adjustment(soil_type);
        // A quarter of the week's rain counts against the requirement.
        let net_need = (adjusted - rainfall_mm_week / 4.0).max(0.0);
        let net_need = (net_need * 10.0).round() / 10.0;

        let frequency_days = if net_need > 50.0 {
            2
        } else if net_need > 30.0 {
            3
        } else {
            7
        };

        IrrigationSchedule {
            crop: crop.to_string(),
            region: region.as_str().to_string(),
            weekly_water_need_mm: net_need,
            irrigation_frequency_days: frequency_days,
            next_irrigation: Utc::now().date_naive() + Days::new(1),
            recommended_method: recommended_method(crop, region).to_string(),
            water_saving_tips: water_saving_tips(),
        }
    }
}

impl Default for IrrigationService {
    fn default() -> Self {
        Self::new()
    }
}

fn region_adjustment(region: Region) -> f64 {
    match region {
        Region::Coastal => 1.1,
        Region::CentralHighlands => 1.0,
        Region::RiftValley => 0.9,
        Region::Eastern => 1.3,
        Region::NorthEastern => 1.5,
        Region::Western => 1.0,
    }
}

fn soil_adjustment(soil_type: &str) -> f64 {
    match soil_type {
        "Sandy" => 1.3,
        "Sandy Loam" => 1.2,
        "Loam" => 1.0,
        "Clay Loam" => 0.9,
        "Clay" => 0.8,
        "Volcanic" => 1.1,
        _ => 1.0,
    }
}

fn recommended_method(crop: &str, region: Region) -> &'static str {
    if matches!(region, Region::Eastern | Region::NorthEastern) {
        "Drip irrigation (water conservation)"
    } else if crop == "Rice" {
        "Flood irrigation"
    } else if matches!(crop, "Coffee" | "Tea") {
        "Sprinkler irrigation"
    } else {
        "Furrow irrigation"
    }
}

fn water_saving_tips() -> Vec<String> {
    [
        "Collect rainwater during rainy seasons",
        "Use mulch to reduce evaporation",
        "Irrigate early morning or late evening",
        "Regularly check for leaks",
    ]
    .iter()
    .map(|t| t.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arid_sandy_rice_needs_frequent_watering() {
        let schedule =
            IrrigationService::new().schedule("Rice", Region::NorthEastern, "Sandy", 0.0);
        // 70 * 1.5 * 1.3 = 136.5 mm/week.
        assert_eq!(schedule.weekly_water_need_mm, 136.5);
        assert_eq!(schedule.irrigation_frequency_days, 2);
        assert_eq!(schedule.recommended_method, "Drip irrigation (water conservation)");
    }

    #[test]
    fn rainfall_offsets_requirement_to_zero() {
        let schedule =
            IrrigationService::new().schedule("Beans", Region::RiftValley, "Clay", 200.0);
        // 35 * 0.9 * 0.8 = 25.2, minus 50 of rain credit, floored.
        assert_eq!(schedule.weekly_water_need_mm, 0.0);
        assert_eq!(schedule.irrigation_frequency_days, 7);
    }

    #[test]
    fn crop_method_selection() {
        let service = IrrigationService::new();
        assert_eq!(
            service
                .schedule("Rice", Region::Western, "Clay", 0.0)
                .recommended_method,
            "Flood irrigation"
        );
        assert_eq!(
            service
                .schedule("Tea", Region::CentralHighlands, "Volcanic", 0.0)
                .recommended_method,
            "Sprinkler irrigation"
        );
        assert_eq!(
            service
                .schedule("Maize", Region::Western, "Loam", 0.0)
                .recommended_method,
            "Furrow irrigation"
        );
    }

    #[test]
    fn unknown_crop_and_soil_use_defaults() {
        let schedule =
            IrrigationService::new().schedule("Arrowroot", Region::Western, "Peaty", 0.0);
        assert_eq!(schedule.weekly_water_need_mm, 40.0);
        assert_eq!(schedule.irrigation_frequency_days, 3);
    }
}
