//! Caller-facing façade tying authentication, the stores, and the data
//! services together. Environmental queries never fail on missing
//! upstream data; the returned `source` field says which tier answered.

use crate::config::Config;
use crate::error::{Result, ShambaError};
use crate::geo;
use crate::models::{
    Coordinates, CropRecommendation, DiseaseDetection, FarmArea, FarmerProfile, GeoContext,
    IrrigationSchedule, NewFarmer, PriceQuote, SoilProfile, WeatherReport, DEFAULT_COORDINATES,
};
use crate::services::{
    DiseaseService, IrrigationService, LocationService, MarketService, RecommendationService,
    SoilService, WeatherService,
};
use crate::store::{MemoryUserStore, SessionStore, UserStore};
use crate::catalog;
use bcrypt::{hash, verify, DEFAULT_COST};
use std::sync::Arc;

pub struct FarmAdvisor {
    users: Arc<dyn UserStore>,
    sessions: SessionStore,
    weather: WeatherService,
    soil: SoilService,
    market: Arc<MarketService>,
    recommender: RecommendationService,
    irrigation: IrrigationService,
    disease: DiseaseService,
    location: LocationService,
}

impl FarmAdvisor {
    pub fn new(config: &Config) -> Self {
        Self::with_store(config, Arc::new(MemoryUserStore::new()))
    }

    pub fn with_store(config: &Config, users: Arc<dyn UserStore>) -> Self {
        let market = Arc::new(MarketService::new());
        Self {
            users,
            sessions: SessionStore::new(),
            weather: WeatherService::new(config),
            soil: SoilService::new(config),
            recommender: RecommendationService::new(Arc::clone(&market)),
            market,
            irrigation: IrrigationService::new(),
            disease: DiseaseService::new(config),
            location: LocationService::new(config),
        }
    }

    /// Register a farmer. Missing optional fields take documented
    /// defaults; when coordinates are given without a county or
    /// elevation, the location service fills them in.
    pub async fn register(&self, new: NewFarmer) -> Result<FarmerProfile> {
        if new.username.trim().is_empty() {
            return Err(ShambaError::InvalidInput("username is required".into()));
        }
        if new.password.is_empty() {
            return Err(ShambaError::InvalidInput("password is required".into()));
        }

        let coordinates = new.coordinates.unwrap_or(DEFAULT_COORDINATES);
        let (county, elevation_m) = match (new.county, new.elevation_m) {
            (Some(county), Some(elevation)) => (county, elevation),
            (county, elevation) if new.coordinates.is_some() => {
                let ctx = self.location.resolve(coordinates.lat, coordinates.lng).await;
                (
                    county.unwrap_or(ctx.county),
                    elevation.unwrap_or(ctx.elevation_m),
                )
            }
            (county, elevation) => (
                county.unwrap_or_else(|| "Nairobi".to_string()),
                elevation.unwrap_or_else(|| {
                    catalog::zone_elevation(geo::region_from_coords(
                        coordinates.lat,
                        coordinates.lng,
                    ))
                }),
            ),
        };

        // Unrecognized counties (including the classifier's "Other")
        // fall back to the default rather than being stored verbatim.
        let county = if catalog::is_kenya_county(&county) {
            county
        } else {
            "Nairobi".to_string()
        };

        let profile = FarmerProfile {
            username: new.username,
            password_hash: hash(&new.password, DEFAULT_COST)?,
            email: new.email.unwrap_or_default(),
            county,
            farm_type: new.farm_type.unwrap_or_else(|| "Mixed".to_string()),
            coordinates,
            crops: new.crops.unwrap_or_else(|| vec!["Maize".to_string()]),
            livestock: new.livestock.unwrap_or_else(|| vec!["Chicken".to_string()]),
            farm_size_acres: new.farm_size_acres.unwrap_or(1.0),
            soil_type: new.soil_type.unwrap_or_else(|| "Loam".to_string()),
            elevation_m,
        };
        self.users.insert_new(profile.clone())?;
        tracing::info!("registered farmer {} in {}", profile.username, profile.county);
        Ok(profile)
    }

    pub fn login(&self, username: &str, password: &str) -> Result<String> {
        let user = self
            .users
            .get(username)
            .ok_or(ShambaError::InvalidCredentials)?;
        if !verify(password, &user.password_hash)? {
            return Err(ShambaError::InvalidCredentials);
        }
        Ok(self.sessions.issue(username))
    }

    pub fn logout(&self, token: &str) -> bool {
        self.sessions.revoke(token)
    }

    fn authorize(&self, token: &str) -> Result<FarmerProfile> {
        let username = self.sessions.resolve(token).ok_or(ShambaError::AuthRequired)?;
        self.users.get(&username).ok_or(ShambaError::AuthRequired)
    }

    pub fn profile(&self, token: &str) -> Result<FarmerProfile> {
        self.authorize(token)
    }

    pub async fn weather(&self, token: &str, lat: f64, lng: f64) -> Result<WeatherReport> {
        self.authorize(token)?;
        Ok(self.weather.report(lat, lng).await)
    }

    pub async fn soil(&self, token: &str, lat: f64, lng: f64) -> Result<SoilProfile> {
        self.authorize(token)?;
        Ok(self.soil.profile(lat, lng).await)
    }

    pub async fn locate(&self, token: &str, lat: f64, lng: f64) -> Result<GeoContext> {
        self.authorize(token)?;
        Ok(self.location.resolve(lat, lng).await)
    }

    pub fn market_price(&self, token: &str, crop: &str, county: &str) -> Result<PriceQuote> {
        self.authorize(token)?;
        self.market.quote(crop, county)
    }

    pub fn recommend_crops(
        &self,
        token: &str,
        county: &str,
        soil_type: &str,
        rainfall_mm: f64,
        elevation_m: f64,
    ) -> Result<Vec<CropRecommendation>> {
        self.authorize(token)?;
        Ok(self
            .recommender
            .recommend(county, soil_type, rainfall_mm, elevation_m))
    }

    /// Irrigation plan for a crop on the caller's farm: region comes
    /// from the stored coordinates, soil from the stored profile.
    pub fn irrigation_schedule(
        &self,
        token: &str,
        crop: &str,
        rainfall_mm_week: f64,
    ) -> Result<IrrigationSchedule> {
        let farmer = self.authorize(token)?;
        let region = geo::region_from_coords(farmer.coordinates.lat, farmer.coordinates.lng);
        Ok(self
            .irrigation
            .schedule(crop, region, &farmer.soil_type, rainfall_mm_week))
    }

    pub async fn detect_disease(
        &self,
        token: &str,
        crop: &str,
        image_base64: Option<String>,
        image_url: Option<String>,
    ) -> Result<DiseaseDetection> {
        self.authorize(token)?;
        Ok(self.disease.detect(crop, image_base64, image_url).await)
    }

    pub fn farm_area(&self, token: &str, points: &[Coordinates]) -> Result<FarmArea> {
        self.authorize(token)?;
        geo::polygon_area(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advisor() -> FarmAdvisor {
        FarmAdvisor::new(&Config::default())
    }

    fn new_farmer(username: &str) -> NewFarmer {
        NewFarmer {
            username: username.to_string(),
            password: "korosho123".to_string(),
            ..Default::default()
        }
    }

    async fn registered_token(advisor: &FarmAdvisor, username: &str) -> String {
        advisor.register(new_farmer(username)).await.unwrap();
        advisor.login(username, "korosho123").unwrap()
    }

    #[tokio::test]
    async fn register_defaults_fill_the_profile() {
        let advisor = advisor();
        let profile = advisor.register(new_farmer("wanjiku")).await.unwrap();
        assert_eq!(profile.county, "Nairobi");
        assert_eq!(profile.coordinates, DEFAULT_COORDINATES);
        assert_eq!(profile.farm_type, "Mixed");
        assert_eq!(profile.soil_type, "Loam");
        assert_eq!(profile.crops, vec!["Maize".to_string()]);
        assert_eq!(profile.livestock, vec!["Chicken".to_string()]);
        assert_ne!(profile.password_hash, "korosho123");
    }

    #[tokio::test]
    async fn unknown_county_falls_back_to_default() {
        let advisor = advisor();
        let mut farmer = new_farmer("wanjiku");
        farmer.county = Some("Atlantis".to_string());
        farmer.elevation_m = Some(1200.0);
        let profile = advisor.register(farmer).await.unwrap();
        assert_eq!(profile.county, "Nairobi");
    }

    #[tokio::test]
    async fn register_rejects_blank_username_and_password() {
        let advisor = advisor();
        let mut no_name = new_farmer("  ");
        no_name.username = "  ".to_string();
        assert!(matches!(
            advisor.register(no_name).await,
            Err(ShambaError::InvalidInput(_))
        ));

        let mut no_password = new_farmer("wanjiku");
        no_password.password = String::new();
        assert!(matches!(
            advisor.register(no_password).await,
            Err(ShambaError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let advisor = advisor();
        advisor.register(new_farmer("wanjiku")).await.unwrap();
        assert!(matches!(
            advisor.register(new_farmer("wanjiku")).await,
            Err(ShambaError::UserAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn login_checks_the_password() {
        let advisor = advisor();
        advisor.register(new_farmer("wanjiku")).await.unwrap();
        assert!(advisor.login("wanjiku", "korosho123").is_ok());
        assert!(matches!(
            advisor.login("wanjiku", "wrong"),
            Err(ShambaError::InvalidCredentials)
        ));
        assert!(matches!(
            advisor.login("nobody", "korosho123"),
            Err(ShambaError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn gated_calls_require_a_live_token() {
        let advisor = advisor();
        assert!(matches!(
            advisor.market_price("bogus", "Maize", "Nairobi"),
            Err(ShambaError::AuthRequired)
        ));

        let token = registered_token(&advisor, "wanjiku").await;
        assert!(advisor.market_price(&token, "Maize", "Nairobi").is_ok());

        assert!(advisor.logout(&token));
        assert!(matches!(
            advisor.market_price(&token, "Maize", "Nairobi"),
            Err(ShambaError::AuthRequired)
        ));
    }

    #[tokio::test]
    async fn recommend_and_irrigation_use_the_session() {
        let advisor = advisor();
        let token = registered_token(&advisor, "wanjiku").await;

        let ranked = advisor
            .recommend_crops(&token, "Kiambu", "Volcanic", 1200.0, 1800.0)
            .unwrap();
        assert!(!ranked.is_empty());
        assert!(ranked.len() <= 5);

        // Default coordinates sit in the Eastern zone, which selects
        // drip irrigation.
        let schedule = advisor.irrigation_schedule(&token, "Maize", 0.0).unwrap();
        assert_eq!(schedule.recommended_method, "Drip irrigation (water conservation)");
    }

    #[tokio::test]
    async fn farm_area_validates_the_polygon() {
        let advisor = advisor();
        let token = registered_token(&advisor, "wanjiku").await;
        let points = [
            Coordinates { lat: -1.29, lng: 36.82 },
            Coordinates { lat: -1.29, lng: 36.83 },
        ];
        assert!(matches!(
            advisor.farm_area(&token, &points),
            Err(ShambaError::InvalidInput(_))
        ));
    }
}
