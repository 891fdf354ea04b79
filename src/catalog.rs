//! Static reference tables for Kenyan agriculture: counties, the crop
//! catalog, weather-zone climate bands, market price bands and irrigation
//! water needs. Lookup functions only; scoring and pricing logic live in
//! the services.

use crate::models::Region;

pub const KENYA_COUNTIES: &[&str] = &[
    "Baringo",
    "Bomet",
    "Bungoma",
    "Busia",
    "Elgeyo-Marakwet",
    "Embu",
    "Garissa",
    "Homa Bay",
    "Isiolo",
    "Kajiado",
    "Kakamega",
    "Kericho",
    "Kiambu",
    "Kilifi",
    "Kirinyaga",
    "Kisii",
    "Kisumu",
    "Kitui",
    "Kwale",
    "Laikipia",
    "Lamu",
    "Machakos",
    "Makueni",
    "Mandera",
    "Marsabit",
    "Meru",
    "Migori",
    "Mombasa",
    "Murang'a",
    "Nairobi",
    "Nakuru",
    "Nandi",
    "Narok",
    "Nyamira",
    "Nyandarua",
    "Nyeri",
    "Samburu",
    "Siaya",
    "Taita Taveta",
    "Tana River",
    "Tharaka-Nithi",
    "Trans Nzoia",
    "Turkana",
    "Uasin Gishu",
    "Vihiga",
    "Wajir",
    "West Pokot",
];

pub fn is_kenya_county(name: &str) -> bool {
    KENYA_COUNTIES.contains(&name)
}

/// A crop in the national catalog. `regions` lists counties (or broader
/// area names) where the crop is established; "All" matches everywhere.
#[derive(Debug, Clone, Copy)]
pub struct CropEntry {
    pub name: &'static str,
    pub season: &'static str,
    pub regions: &'static [&'static str],
}

/// Catalog iteration order is fixed; the recommendation ranking breaks
/// score ties by this order.
pub const KENYA_CROPS: &[CropEntry] = &[
    CropEntry {
        name: "Maize",
        season: "Long Rains",
        regions: &["Trans Nzoia", "Uasin Gishu", "Nakuru"],
    },
    CropEntry {
        name: "Tea",
        season: "Year-round",
        regions: &["Kericho", "Nyeri", "Murang'a"],
    },
    CropEntry {
        name: "Coffee",
        season: "Year-round",
        regions: &["Kiambu", "Kirinyaga", "Nyeri"],
    },
    CropEntry {
        name: "Wheat",
        season: "Short Rains",
        regions: &["Narok", "Nakuru", "Laikipia"],
    },
    CropEntry {
        name: "Rice",
        season: "Irrigation-based",
        regions: &["Mwea", "Ahero", "Bunyala"],
    },
    CropEntry {
        name: "Sugarcane",
        season: "Year-round",
        regions: &["Kisumu", "Kakamega", "Bungoma"],
    },
    CropEntry {
        name: "Sorghum",
        season: "Short Rains",
        regions: &["Eastern", "Coastal"],
    },
    CropEntry {
        name: "Millet",
        season: "Short Rains",
        regions: &["Eastern", "Western"],
    },
    CropEntry {
        name: "Beans",
        season: "Both Seasons",
        regions: &["All"],
    },
    CropEntry {
        name: "Potatoes",
        season: "Long Rains",
        regions: &["Nyandarua", "Meru", "Nakuru"],
    },
    CropEntry {
        name: "Tomatoes",
        season: "Year-round",
        regions: &["Kajiado", "Machakos", "Kirinyaga"],
    },
    CropEntry {
        name: "Avocado",
        season: "Year-round",
        regions: &["Murang'a", "Kiambu", "Meru"],
    },
    CropEntry {
        name: "Mango",
        season: "Rainy Season",
        regions: &["Eastern", "Coastal"],
    },
    CropEntry {
        name: "Banana",
        season: "Year-round",
        regions: &["Kisii", "Meru", "Murang'a"],
    },
];

pub fn crop_entry(name: &str) -> Option<&'static CropEntry> {
    KENYA_CROPS.iter().find(|c| c.name == name)
}

/// Livestock and the broader areas they are established in; "All"
/// matches everywhere.
pub const KENYA_LIVESTOCK: &[(&str, &[&str])] = &[
    ("Cattle", &["Rift Valley", "Eastern", "Central"]),
    ("Goats", &["All"]),
    ("Sheep", &["Rift Valley", "Eastern"]),
    ("Chicken", &["All"]),
    ("Pigs", &["Central", "Western"]),
    ("Camels", &["North Eastern", "Rift Valley"]),
];

pub fn livestock_for_area(area: &str) -> Vec<&'static str> {
    KENYA_LIVESTOCK
        .iter()
        .filter(|(_, areas)| areas.contains(&"All") || areas.contains(&area))
        .map(|(name, _)| *name)
        .collect()
}

/// Average yield in tons/acre for profit estimation.
pub fn yield_per_acre(crop: &str) -> f64 {
    match crop {
        "Maize" => 15.0,
        "Beans" => 8.0,
        "Potatoes" => 30.0,
        "Tomatoes" => 20.0,
        "Coffee" => 2.0,
        "Tea" => 3.0,
        _ => 10.0,
    }
}

/// Recommended varieties, county-specific where breeding programs
/// target a county, otherwise the general release list.
pub fn recommended_varieties(crop: &str, county: &str) -> Vec<String> {
    let picks: &[&str] = match (crop, county) {
        ("Maize", "Trans Nzoia") => &["DH04", "DK8031", "H513"],
        ("Maize", _) => &["H629", "SC DUMA 43", "WE1101"],
        ("Coffee", _) => &["Ruiru 11", "Batian", "SL28", "SL34"],
        ("Tea", "Kericho") => &["TRFK 301/5", "TRFK 306", "BB35"],
        ("Tea", _) => &["TRFK 301/5", "TRFK 306"],
        ("Beans", _) => &["Rosecoco", "Mwitemania", "Canadian Wonder"],
        _ => &["Local recommended variety"],
    };
    picks.iter().map(|v| v.to_string()).collect()
}

/// Seasonal temperature band (min, max) and annual rainfall band
/// (min, max) for an agro-ecological zone.
pub fn zone_climate(region: Region) -> ((f64, f64), (f64, f64)) {
    match region {
        Region::Coastal => ((22.0, 32.0), (1000.0, 2000.0)),
        Region::CentralHighlands => ((10.0, 25.0), (1000.0, 2200.0)),
        Region::Western => ((18.0, 30.0), (1200.0, 2000.0)),
        Region::RiftValley => ((10.0, 28.0), (600.0, 1800.0)),
        Region::Eastern => ((20.0, 35.0), (500.0, 1000.0)),
        Region::NorthEastern => ((25.0, 40.0), (250.0, 500.0)),
    }
}

/// Elevation estimate in meters when no measured value is available.
pub fn zone_elevation(region: Region) -> f64 {
    match region {
        Region::Coastal => 0.0,
        Region::CentralHighlands => 1800.0,
        Region::Western => 1500.0,
        Region::RiftValley => 2000.0,
        Region::Eastern => 1200.0,
        Region::NorthEastern => 800.0,
    }
}

/// Kenyan season for a calendar month, plus its daily rain probability.
pub fn season_for_month(month: u32) -> (&'static str, f64) {
    match month {
        3..=5 => ("Long Rains", 0.7),
        10 | 11 => ("Short Rains", 0.6),
        _ => ("Dry Season", 0.3),
    }
}

/// Base price band in KSh for the national market model.
#[derive(Debug, Clone, Copy)]
pub struct PriceBand {
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
}

impl PriceBand {
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

pub fn price_band(crop: &str) -> Option<PriceBand> {
    let (min, max, unit) = match crop {
        "Maize" => (35.0, 60.0, "kg"),
        "Wheat" => (40.0, 70.0, "kg"),
        "Rice" => (80.0, 150.0, "kg"),
        "Beans" => (120.0, 200.0, "kg"),
        "Potatoes" => (30.0, 80.0, "kg"),
        "Tomatoes" => (40.0, 120.0, "kg"),
        "Avocado" => (10.0, 50.0, "piece"),
        "Mango" => (20.0, 80.0, "kg"),
        "Banana" => (10.0, 50.0, "bunch"),
        "Tea" => (200.0, 350.0, "kg"),
        "Coffee" => (300.0, 600.0, "kg"),
        "Sugarcane" => (20.0, 40.0, "stalk"),
        "Milk" => (50.0, 80.0, "litre"),
        _ => return None,
    };
    Some(PriceBand { min, max, unit })
}

/// Seasonal price factor: harvest months discount, planting/off-season
/// months carry a premium. Crops without a table trade flat.
pub fn seasonal_factor(crop: &str, month: u32) -> f64 {
    match crop {
        "Maize" => match month {
            8..=10 => 0.8,
            3 | 4 => 1.2,
            _ => 1.0,
        },
        "Beans" => match month {
            10 | 11 => 0.9,
            3 | 4 => 1.1,
            _ => 1.0,
        },
        "Potatoes" => match month {
            10 | 11 => 0.8,
            1 | 2 => 1.2,
            _ => 1.0,
        },
        "Tomatoes" => match month {
            1 | 2 => 1.3,
            6 | 7 => 0.7,
            _ => 1.0,
        },
        _ => 1.0,
    }
}

/// Regional price factor: major cities carry a premium, remote
/// north-eastern counties a larger one.
pub fn regional_factor(county: &str) -> f64 {
    match county {
        "Nairobi" | "Mombasa" => 1.2,
        "Garissa" | "Mandera" | "Wajir" => 1.5,
        _ => 1.0,
    }
}

/// Base crop water requirement in mm/week.
pub fn weekly_water_need(crop: &str) -> f64 {
    match crop {
        "Maize" => 40.0,
        "Beans" => 35.0,
        "Coffee" => 50.0,
        "Tea" => 60.0,
        "Tomatoes" => 55.0,
        "Potatoes" => 45.0,
        "Rice" => 70.0,
        "Sugarcane" => 65.0,
        _ => 40.0,
    }
}
