use crate::config::{ApiKeyConfig, WEATHERAPI_PLACEHOLDER};
use crate::error::{Result, ShambaError};
use crate::models::{
    Coordinates, CurrentConditions, DailyOutlook, DataOrigin, WeatherBundle,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use super::ProviderAttempt;

const API_BASE_URL: &str = "http://api.weatherapi.com/v1";

/// WeatherAPI.com forecast client. Keyed; first tier of the weather
/// chain because its coverage of East Africa is the most reliable.
pub struct WeatherApiClient {
    client: reqwest::Client,
    config: ApiKeyConfig,
    base_url: String,
}

// WeatherAPI.com response structures
#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    #[serde(default)]
    region: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    humidity: f64,
    #[serde(default)]
    precip_mm: f64,
    condition: WaCondition,
    feelslike_c: f64,
    #[serde(default)]
    wind_kph: Option<f64>,
    #[serde(default)]
    wind_dir: Option<String>,
    #[serde(default)]
    pressure_mb: Option<f64>,
    #[serde(default)]
    uv: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    totalprecip_mm: f64,
    condition: WaCondition,
}

impl WeatherApiClient {
    pub fn new(config: ApiKeyConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            base_url: API_BASE_URL.to_string(),
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

    async fn fetch_forecast(&self, coords: &Coordinates) -> Result<WeatherBundle> {
        let url = format!(
            "{}/forecast.json?key={}&q={},{}&days=7&aqi=no&alerts=yes",
            self.base_url, self.config.api_key, coords.lat, coords.lng
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ShambaError::ProviderUnavailable(format!("WeatherAPI: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ShambaError::ProviderUnavailable(format!(
                "WeatherAPI returned {}: {}",
                status, body
            )));
        }

        let wa_response: WaForecastResponse = response.json().await.map_err(|e| {
            ShambaError::ProviderUnavailable(format!("Failed to parse WeatherAPI response: {}", e))
        })?;

        Ok(self.convert_response(wa_response))
    }

    fn convert_response(&self, response: WaForecastResponse) -> WeatherBundle {
        let current = CurrentConditions {
            temperature_c: response.current.temp_c,
            humidity_percent: response.current.humidity,
            precipitation_mm: response.current.precip_mm,
            condition: response.current.condition.text,
            feels_like_c: response.current.feelslike_c,
            wind_kph: response.current.wind_kph,
            wind_direction: response.current.wind_dir,
            pressure_mb: response.current.pressure_mb,
            uv_index: response.current.uv,
        };

        let forecast: Vec<DailyOutlook> = response
            .forecast
            .forecastday
            .into_iter()
            .take(7)
            .map(|day| DailyOutlook {
                date: day.date,
                temp_max_c: day.day.maxtemp_c,
                temp_min_c: day.day.mintemp_c,
                precipitation_mm: day.day.totalprecip_mm,
                condition: day.day.condition.text,
            })
            .collect();

        let provider_region = if response.location.region.is_empty() {
            None
        } else {
            Some(response.location.region)
        };

        WeatherBundle {
            current,
            forecast,
            // Structured alerts are derived downstream by the advisory
            // rules, which run on every tier uniformly.
            alerts: Vec::new(),
            provider_region,
            location_name: Some(response.location.name),
        }
    }
}

#[async_trait]
impl ProviderAttempt<Coordinates, WeatherBundle> for WeatherApiClient {
    fn origin(&self) -> DataOrigin {
        DataOrigin::WeatherApi
    }

    fn configured(&self) -> bool {
        self.config.is_configured(WEATHERAPI_PLACEHOLDER)
    }

    async fn fetch(&self, coords: &Coordinates) -> Result<WeatherBundle> {
        self.fetch_forecast(coords).await
    }
}
