use crate::error::{Result, ShambaError};
use crate::models::{Coordinates, DataOrigin, SoilReading};
use async_trait::async_trait;
use serde::Deserialize;

use super::ProviderAttempt;

const API_BASE_URL: &str = "https://rest.isric.org/soilgrids/v2.0";

const SURFACE_DEPTH: &str = "0-5cm";

/// The eight properties a complete reading needs, fetched in one query.
const PROPERTIES: [&str; 8] = [
    "phh2o", "soc", "clay", "sand", "silt", "nitrogen", "cec", "bdod",
];

/// ISRIC SoilGrids client. Keyless; the only external tier of the soil
/// chain.
pub struct SoilGridsClient {
    client: reqwest::Client,
    base_url: String,
}

// SoilGrids response structures
#[derive(Debug, Deserialize)]
struct SgResponse {
    #[serde(default)]
    properties: Vec<SgProperty>,
}

#[derive(Debug, Deserialize)]
struct SgProperty {
    name: String,
    #[serde(default)]
    depths: Vec<SgDepth>,
}

#[derive(Debug, Deserialize)]
struct SgDepth {
    #[serde(default)]
    layers: Vec<SgLayer>,
}

#[derive(Debug, Deserialize)]
struct SgLayer {
    #[serde(default)]
    values: SgValues,
}

#[derive(Debug, Default, Deserialize)]
struct SgValues {
    mean: Option<f64>,
}

impl SoilGridsClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Create a client with a custom base URL (for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn fetch_reading(&self, coords: &Coordinates) -> Result<SoilReading> {
        // The query endpoint accepts repeated property params, so all
        // eight come back in a single round trip.
        let properties: String = PROPERTIES
            .iter()
            .map(|p| format!("&property={}", p))
            .collect();
        let url = format!(
            "{}/properties/query?lon={}&lat={}{}&depth={}&value=mean",
            self.base_url, coords.lng, coords.lat, properties, SURFACE_DEPTH
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ShambaError::ProviderUnavailable(format!("SoilGrids: {}", e)))?;

        if !response.status().is_success() {
            return Err(ShambaError::ProviderUnavailable(format!(
                "SoilGrids returned {}",
                response.status()
            )));
        }

        let sg_response: SgResponse = response.json().await.map_err(|e| {
            ShambaError::ProviderUnavailable(format!("Failed to parse SoilGrids response: {}", e))
        })?;

        convert_response(&sg_response)
    }
}

fn convert_response(response: &SgResponse) -> Result<SoilReading> {
    let means: Vec<Option<f64>> = PROPERTIES
        .iter()
        .map(|p| extract_mean(response, p))
        .collect();

    if means.iter().all(|m| m.is_none()) {
        return Err(ShambaError::ProviderUnavailable(
            "SoilGrids reported no surface-layer values".to_string(),
        ));
    }

    // Missing individual properties fall back to Kenyan averages,
    // matching the defaults used for the synthetic tier.
    Ok(SoilReading {
        ph: means[0].unwrap_or(6.5),
        organic_carbon_percent: means[1].unwrap_or(1.2),
        clay_percent: means[2].unwrap_or(20.0),
        sand_percent: means[3].unwrap_or(40.0),
        silt_percent: means[4].unwrap_or(40.0),
        nitrogen_percent: means[5].unwrap_or(0.1),
        cec: means[6].unwrap_or(10.0),
        bulk_density: means[7].unwrap_or(1.3),
    })
}

fn extract_mean(response: &SgResponse, property: &str) -> Option<f64> {
    response
        .properties
        .iter()
        .find(|p| p.name == property)?
        .depths
        .first()?
        .layers
        .first()?
        .values
        .mean
}

impl Default for SoilGridsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderAttempt<Coordinates, SoilReading> for SoilGridsClient {
    fn origin(&self) -> DataOrigin {
        DataOrigin::SoilGrids
    }

    async fn fetch(&self, coords: &Coordinates) -> Result<SoilReading> {
        self.fetch_reading(coords).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_surface_mean() {
        let body = r#"{
            "properties": [
                {"name": "phh2o", "depths": [
                    {"layers": [{"values": {"mean": 6.1}}]}
                ]}
            ]
        }"#;
        let parsed: SgResponse = serde_json::from_str(body).unwrap();
        assert_eq!(extract_mean(&parsed, "phh2o"), Some(6.1));
        assert_eq!(extract_mean(&parsed, "clay"), None);
    }

    #[test]
    fn partial_batch_fills_missing_fields_with_averages() {
        let body = r#"{
            "properties": [
                {"name": "phh2o", "depths": [
                    {"layers": [{"values": {"mean": 5.8}}]}
                ]},
                {"name": "clay", "depths": [
                    {"layers": [{"values": {"mean": 28.0}}]}
                ]}
            ]
        }"#;
        let parsed: SgResponse = serde_json::from_str(body).unwrap();
        let reading = convert_response(&parsed).unwrap();
        assert_eq!(reading.ph, 5.8);
        assert_eq!(reading.clay_percent, 28.0);
        assert_eq!(reading.sand_percent, 40.0);
        assert_eq!(reading.bulk_density, 1.3);
    }

    #[test]
    fn empty_batch_is_an_error() {
        let parsed: SgResponse = serde_json::from_str(r#"{"properties": []}"#).unwrap();
        assert!(matches!(
            convert_response(&parsed),
            Err(ShambaError::ProviderUnavailable(_))
        ));
    }

    #[test]
    fn missing_mean_is_none() {
        let body = r#"{
            "properties": [
                {"name": "soc", "depths": [{"layers": [{"values": {}}]}]}
            ]
        }"#;
        let parsed: SgResponse = serde_json::from_str(body).unwrap();
        assert_eq!(extract_mean(&parsed, "soc"), None);
    }
}
