use serde::{Deserialize, Serialize};

/// The six agro-ecological zones used to parameterize weather bands,
/// elevation estimates and advisory rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Coastal,
    Western,
    RiftValley,
    Eastern,
    NorthEastern,
    CentralHighlands,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Coastal => "Coastal",
            Region::Western => "Western",
            Region::RiftValley => "Rift Valley",
            Region::Eastern => "Eastern",
            Region::NorthEastern => "North Eastern",
            Region::CentralHighlands => "Central Highlands",
        }
    }

    pub fn all() -> [Region; 6] {
        [
            Region::Coastal,
            Region::Western,
            Region::RiftValley,
            Region::Eastern,
            Region::NorthEastern,
            Region::CentralHighlands,
        ]
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Administrative and agro-ecological context resolved from a coordinate.
/// Derived purely from coordinates and static tables; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoContext {
    pub latitude: f64,
    pub longitude: f64,
    /// One of the 47 Kenyan counties, or "Other" when no box matches.
    pub county: String,
    pub region: Region,
    /// Meters above sea level, measured or estimated from the region.
    pub elevation_m: f64,
}

/// Result of a farm-boundary area calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmArea {
    pub area_acres: f64,
    pub area_hectares: f64,
    pub area_sq_meters: f64,
}
