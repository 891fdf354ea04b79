use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Nairobi city center, used when a farmer registers without coordinates.
pub const DEFAULT_COORDINATES: Coordinates = Coordinates {
    lat: -1.2921,
    lng: 36.8219,
};

/// A registered farmer. Owned by the user store; the password is kept
/// only as a bcrypt hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmerProfile {
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: String,
    pub county: String,
    pub farm_type: String,
    pub coordinates: Coordinates,
    pub crops: Vec<String>,
    pub livestock: Vec<String>,
    pub farm_size_acres: f64,
    pub soil_type: String,
    pub elevation_m: f64,
}

/// Registration fields; optional fields fall back to documented defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewFarmer {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub county: Option<String>,
    pub farm_type: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub crops: Option<Vec<String>>,
    pub livestock: Option<Vec<String>>,
    pub farm_size_acres: Option<f64>,
    pub soil_type: Option<String>,
    pub elevation_m: Option<f64>,
}
