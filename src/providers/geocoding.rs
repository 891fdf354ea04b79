use crate::config::{ApiKeyConfig, POSITIONSTACK_PLACEHOLDER};
use crate::error::{Result, ShambaError};
use crate::models::{Coordinates, DataOrigin};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::ProviderAttempt;

const POSITIONSTACK_BASE_URL: &str = "http://api.positionstack.com/v1";
const OPEN_ELEVATION_BASE_URL: &str = "https://api.open-elevation.com/api/v1";

/// Reverse-geocode result as reported by the provider. Absent fields
/// fall through to the bounding-box classifier downstream.
#[derive(Debug, Clone, Default)]
pub struct GeocodedPlace {
    pub county: Option<String>,
    pub region: Option<String>,
    pub locality: Option<String>,
    pub label: Option<String>,
}

/// PositionStack reverse geocoder. Keyed.
pub struct PositionStackClient {
    client: reqwest::Client,
    config: ApiKeyConfig,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PsResponse {
    #[serde(default)]
    data: Vec<PsPlace>,
}

#[derive(Debug, Deserialize)]
struct PsPlace {
    #[serde(default)]
    county: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    locality: Option<String>,
    #[serde(default)]
    label: Option<String>,
}

impl PositionStackClient {
    pub fn new(config: ApiKeyConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            base_url: POSITIONSTACK_BASE_URL.to_string(),
        }
    }

    /// Create a client with a custom base URL (for testing).
    pub fn with_base_url(config: ApiKeyConfig, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            base_url: base_url.into(),
        }
    }

    async fn reverse_geocode(&self, coords: &Coordinates) -> Result<GeocodedPlace> {
        let url = format!(
            "{}/reverse?access_key={}&query={},{}",
            self.base_url, self.config.api_key, coords.lat, coords.lng
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ShambaError::ProviderUnavailable(format!("PositionStack: {}", e)))?;

        if !response.status().is_success() {
            return Err(ShambaError::ProviderUnavailable(format!(
                "PositionStack returned {}",
                response.status()
            )));
        }

        let ps_response: PsResponse = response.json().await.map_err(|e| {
            ShambaError::ProviderUnavailable(format!(
                "Failed to parse PositionStack response: {}",
                e
            ))
        })?;

        let place = ps_response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| {
                ShambaError::ProviderUnavailable("PositionStack returned no matches".to_string())
            })?;

        Ok(GeocodedPlace {
            county: place.county,
            region: place.region,
            locality: place.locality,
            label: place.label,
        })
    }
}

#[async_trait]
impl ProviderAttempt<Coordinates, GeocodedPlace> for PositionStackClient {
    fn origin(&self) -> DataOrigin {
        DataOrigin::PositionStack
    }

    fn configured(&self) -> bool {
        self.config.is_configured(POSITIONSTACK_PLACEHOLDER)
    }

    async fn fetch(&self, coords: &Coordinates) -> Result<GeocodedPlace> {
        self.reverse_geocode(coords).await
    }
}

/// Open-Elevation lookup. Keyless, with a tighter timeout than the
/// other providers since the fallback constants are good enough.
pub struct OpenElevationClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OeResponse {
    #[serde(default)]
    results: Vec<OeResult>,
}

#[derive(Debug, Deserialize)]
struct OeResult {
    elevation: f64,
}

impl OpenElevationClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: OPEN_ELEVATION_BASE_URL.to_string(),
        }
    }

    /// Create a client with a custom base URL (for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn lookup(&self, coords: &Coordinates) -> Result<f64> {
        let url = format!(
            "{}/lookup?locations={},{}",
            self.base_url, coords.lat, coords.lng
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ShambaError::ProviderUnavailable(format!("Open-Elevation: {}", e)))?;

        if !response.status().is_success() {
            return Err(ShambaError::ProviderUnavailable(format!(
                "Open-Elevation returned {}",
                response.status()
            )));
        }

        let oe_response: OeResponse = response.json().await.map_err(|e| {
            ShambaError::ProviderUnavailable(format!(
                "Failed to parse Open-Elevation response: {}",
                e
            ))
        })?;

        oe_response
            .results
            .first()
            .map(|r| r.elevation)
            .ok_or_else(|| {
                ShambaError::ProviderUnavailable("Open-Elevation returned no results".to_string())
            })
    }
}

impl Default for OpenElevationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderAttempt<Coordinates, f64> for OpenElevationClient {
    fn origin(&self) -> DataOrigin {
        DataOrigin::OpenElevation
    }

    fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(5)
    }

    async fn fetch(&self, coords: &Coordinates) -> Result<f64> {
        self.lookup(coords).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positionstack_placeholder_is_not_configured() {
        let client = PositionStackClient::new(ApiKeyConfig::with_key(POSITIONSTACK_PLACEHOLDER));
        assert!(!client.configured());
    }

    #[test]
    fn parses_positionstack_response() {
        let body = r#"{
            "data": [{
                "county": "Kiambu", "region": "Central",
                "locality": "Limuru", "label": "Limuru, Kiambu, Kenya"
            }]
        }"#;
        let parsed: PsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data[0].county.as_deref(), Some("Kiambu"));
    }

    #[test]
    fn parses_elevation_response() {
        let body = r#"{"results": [{"elevation": 1795.0, "latitude": -1.29, "longitude": 36.82}]}"#;
        let parsed: OeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.results[0].elevation, 1795.0);
    }
}
