use crate::config::Config;
use crate::geo;
use crate::models::{
    Coordinates, ErosionRisk, FertilityClass, LimingRequirement, Region, SoilProfile,
    SoilReading, SoilTexture,
};
use crate::providers::{synthetic_seed, ProviderChain, SoilGridsClient, Sourced};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Soil characterization. One external tier (SoilGrids) plus a
/// synthetic generator; every tier runs the same enrichment so the
/// output shape never depends on which tier answered.
pub struct SoilService {
    chain: ProviderChain<Coordinates, SoilReading>,
}

impl SoilService {
    pub fn new(_config: &Config) -> Self {
        let chain = ProviderChain::new(|coords: &Coordinates| {
            synthetic_reading(coords, Utc::now())
        })
        .with_attempt(SoilGridsClient::new());

        Self { chain }
    }

    pub async fn profile(&self, lat: f64, lng: f64) -> SoilProfile {
        let coords = Coordinates { lat, lng };
        let sourced = self.chain.fetch(&coords).await;
        enrich(&coords, sourced, Utc::now())
    }
}

fn enrich(coords: &Coordinates, sourced: Sourced<SoilReading>, now: DateTime<Utc>) -> SoilProfile {
    let reading = sourced.value;
    let region = geo::region_from_coords(coords.lat, coords.lng);
    let county = geo::county_from_coords(coords.lat, coords.lng);

    let texture = classify_texture(
        reading.clay_percent,
        reading.sand_percent,
        reading.silt_percent,
    );
    let fertility = classify_fertility(
        reading.organic_carbon_percent,
        reading.nitrogen_percent,
        reading.cec,
    );

    SoilProfile {
        source: sourced.origin,
        timestamp: now,
        region,
        county,
        ph: reading.ph,
        organic_carbon_percent: reading.organic_carbon_percent,
        clay_percent: reading.clay_percent,
        sand_percent: reading.sand_percent,
        silt_percent: reading.silt_percent,
        nitrogen_percent: reading.nitrogen_percent,
        cec: reading.cec,
        bulk_density: reading.bulk_density,
        texture,
        fertility,
        water_holding_capacity: water_holding_capacity(
            reading.clay_percent,
            reading.organic_carbon_percent,
        ),
        erosion_risk: erosion_risk(region, reading.sand_percent, reading.clay_percent),
        liming: liming_requirement(reading.ph),
        fertilizer_recommendations: fertilizer_recommendations(&reading, region),
        suitable_crops: suitable_crops(reading.ph, texture, region),
    }
}

/// USDA texture triangle, simplified to a fixed decision tree.
pub(crate) fn classify_texture(clay: f64, sand: f64, silt: f64) -> SoilTexture {
    if clay > 40.0 {
        SoilTexture::Clay
    } else if sand > 70.0 {
        SoilTexture::Sandy
    } else if silt > 80.0 {
        SoilTexture::Silt
    } else if clay > 27.0 && sand < 52.0 {
        SoilTexture::ClayLoam
    } else if clay > 27.0 && sand > 20.0 {
        SoilTexture::SandyClayLoam
    } else if clay > 20.0 && sand < 45.0 {
        SoilTexture::Loam
    } else if sand > 45.0 && clay < 20.0 {
        SoilTexture::SandyLoam
    } else {
        SoilTexture::Loam
    }
}

/// Three-factor point score: organic carbon, nitrogen and CEC each
/// contribute 1-3 points.
pub(crate) fn classify_fertility(organic_carbon: f64, nitrogen: f64, cec: f64) -> FertilityClass {
    let mut score = 0;

    score += if organic_carbon > 2.0 {
        3
    } else if organic_carbon > 1.0 {
        2
    } else {
        1
    };
    score += if nitrogen > 0.15 {
        3
    } else if nitrogen > 0.08 {
        2
    } else {
        1
    };
    score += if cec > 15.0 {
        3
    } else if cec > 10.0 {
        2
    } else {
        1
    };

    if score >= 8 {
        FertilityClass::High
    } else if score >= 5 {
        FertilityClass::Medium
    } else {
        FertilityClass::Low
    }
}

fn water_holding_capacity(clay: f64, organic_carbon: f64) -> f64 {
    let whc = 10.0 + clay * 0.4 + organic_carbon * 3.0;
    (whc * 10.0).round() / 10.0
}

fn erosion_risk(region: Region, sand: f64, clay: f64) -> ErosionRisk {
    let high_risk_region = matches!(region, Region::Eastern | Region::NorthEastern);
    if high_risk_region || sand > 60.0 {
        ErosionRisk::High
    } else if clay > 35.0 {
        ErosionRisk::Low
    } else {
        ErosionRisk::Medium
    }
}

fn liming_requirement(ph: f64) -> LimingRequirement {
    if ph >= 6.5 {
        LimingRequirement::not_required()
    } else if ph >= 5.5 {
        LimingRequirement::required("0.5-1.0 tons/acre", "Agricultural lime")
    } else if ph >= 4.5 {
        LimingRequirement::required("1.0-2.0 tons/acre", "Agricultural lime")
    } else {
        LimingRequirement::required("2.0-3.0 tons/acre", "Dolomitic lime")
    }
}

fn fertilizer_recommendations(reading: &SoilReading, region: Region) -> Vec<String> {
    let mut recommendations = Vec::new();

    if reading.ph < 5.5 {
        recommendations.push(format!(
            "Apply 2-3 tons/acre of agricultural lime to raise pH from {:.2} to 6.0-6.5",
            reading.ph
        ));
    } else if reading.ph > 7.5 {
        recommendations.push("Apply gypsum or sulfur to lower pH".to_string());
    }

    if reading.organic_carbon_percent < 1.5 {
        recommendations.push("Add 10-15 tons/acre of farmyard manure or compost".to_string());
        recommendations.push("Practice green manuring with legumes".to_string());
    }

    match region {
        Region::CentralHighlands => {
            recommendations.push("For coffee: Apply NPK 17:17:17 + micronutrients".to_string());
            recommendations.push("For tea: Apply NPK 25:5:5 quarterly".to_string());
        }
        Region::RiftValley => {
            recommendations.push("For maize: Apply DAP at planting, CAN top dressing".to_string());
            recommendations.push("For wheat: Apply NPK 23:23:0 at planting".to_string());
        }
        _ => {}
    }

    recommendations.push("Conduct soil testing every 2-3 years".to_string());
    recommendations.push("Practice crop rotation to maintain soil fertility".to_string());

    recommendations.truncate(5);
    recommendations
}

/// pH-band, texture-band and region membership, deduplicated keeping
/// the first occurrence, capped at 10.
fn suitable_crops(ph: f64, texture: SoilTexture, region: Region) -> Vec<String> {
    let mut crops: Vec<&'static str> = Vec::new();
    let push_all = |candidates: &[&'static str], crops: &mut Vec<&'static str>| {
        for crop in candidates {
            if !crops.contains(crop) {
                crops.push(crop);
            }
        }
    };

    if (5.0..=6.5).contains(&ph) {
        push_all(&["Maize", "Beans", "Potatoes", "Wheat"], &mut crops);
    }
    if (4.5..=5.5).contains(&ph) {
        push_all(&["Coffee", "Tea", "Pyrethrum"], &mut crops);
    }
    if (6.0..=7.5).contains(&ph) {
        push_all(&["Tomatoes", "Cabbages", "Kales"], &mut crops);
    }

    match texture {
        SoilTexture::Clay | SoilTexture::ClayLoam | SoilTexture::SandyClayLoam => {
            push_all(&["Rice", "Sugarcane", "Bananas"], &mut crops);
        }
        SoilTexture::Sandy | SoilTexture::SandyLoam => {
            push_all(&["Cassava", "Sweet Potatoes", "Groundnuts"], &mut crops);
        }
        _ => {}
    }

    match region {
        Region::CentralHighlands => {
            push_all(&["Coffee", "Tea", "Dairy pastures"], &mut crops);
        }
        Region::RiftValley => {
            push_all(&["Maize", "Wheat", "Barley", "Potatoes"], &mut crops);
        }
        Region::Coastal => {
            push_all(&["Coconut", "Cashew", "Mango", "Cassava"], &mut crops);
        }
        Region::Western => {
            push_all(&["Sugarcane", "Maize", "Beans", "Bananas"], &mut crops);
        }
        _ => {}
    }

    crops.truncate(10);
    crops.into_iter().map(|c| c.to_string()).collect()
}

/// Synthetic soil reading, deterministic in (coordinate, date): pH and
/// organic carbon drawn from the zone's plausible range, the remaining
/// properties derived analytically.
pub(crate) fn synthetic_reading(coords: &Coordinates, now: DateTime<Utc>) -> SoilReading {
    let region = geo::region_from_coords(coords.lat, coords.lng);
    let ((ph_min, ph_max), (org_min, org_max)) = region_soil_ranges(region);

    let seed = synthetic_seed(&[
        b"soil",
        coords.lat.to_string().as_bytes(),
        coords.lng.to_string().as_bytes(),
        now.date_naive().to_string().as_bytes(),
    ]);
    let mut rng = StdRng::seed_from_u64(seed);

    let ph = rng.random_range(ph_min..ph_max);
    let organic_carbon = rng.random_range(org_min..org_max);
    let clay = rng.random_range(15.0..35.0);
    let sand = rng.random_range(30.0..60.0);
    let silt = 100.0 - clay - sand;

    SoilReading {
        ph,
        organic_carbon_percent: organic_carbon,
        clay_percent: clay,
        sand_percent: sand,
        silt_percent: silt,
        nitrogen_percent: organic_carbon / 20.0,
        cec: 5.0 + clay * 0.3 + organic_carbon * 2.0,
        bulk_density: 1.1 + sand * 0.005,
    }
}

/// (pH range, organic-carbon range) per zone.
fn region_soil_ranges(region: Region) -> ((f64, f64), (f64, f64)) {
    match region {
        Region::CentralHighlands => ((5.0, 6.5), (2.0, 4.0)),
        Region::RiftValley => ((6.0, 7.5), (1.0, 2.5)),
        Region::Coastal => ((6.5, 8.0), (0.5, 1.5)),
        Region::Western => ((5.5, 6.5), (1.5, 3.0)),
        Region::Eastern | Region::NorthEastern => ((6.0, 7.0), (1.0, 2.0)),
    }
}
