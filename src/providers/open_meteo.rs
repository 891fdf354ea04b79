use crate::error::{Result, ShambaError};
use crate::models::{
    Coordinates, CurrentConditions, DailyOutlook, DataOrigin, WeatherBundle,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use super::ProviderAttempt;

const API_BASE_URL: &str = "https://api.open-meteo.com/v1";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,precipitation,weather_code,wind_speed_10m,wind_direction_10m,pressure_msl";
const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,weather_code,wind_speed_10m_max";

/// Open-Meteo forecast client. Keyless second tier of the weather chain.
pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
}

// Open-Meteo response structures
#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current: OmCurrent,
    daily: OmDaily,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    #[serde(default)]
    precipitation: f64,
    #[serde(default)]
    weather_code: u32,
    #[serde(default)]
    wind_speed_10m: Option<f64>,
    #[serde(default)]
    wind_direction_10m: Option<f64>,
    #[serde(default)]
    pressure_msl: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<NaiveDate>,
    #[serde(default)]
    weather_code: Vec<u32>,
    #[serde(default)]
    temperature_2m_max: Vec<f64>,
    #[serde(default)]
    temperature_2m_min: Vec<f64>,
    #[serde(default)]
    precipitation_sum: Vec<f64>,
}

/// WMO weather interpretation codes to display text.
fn describe_weather_code(code: u32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Clear sky",
    }
}

/// Apparent temperature for providers that do not report one. Below
/// 27°C humidity has little effect; above, it adds a humidity penalty.
pub fn feels_like(temp_c: f64, humidity_percent: f64) -> f64 {
    if temp_c < 27.0 {
        temp_c
    } else {
        temp_c + 0.05 * humidity_percent
    }
}

impl OpenMeteoClient {
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

    async fn fetch_forecast(&self, coords: &Coordinates) -> Result<WeatherBundle> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&current={}&daily={}&timezone=Africa%2FNairobi&forecast_days=7",
            self.base_url, coords.lat, coords.lng, CURRENT_FIELDS, DAILY_FIELDS
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ShambaError::ProviderUnavailable(format!("Open-Meteo: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ShambaError::ProviderUnavailable(format!(
                "Open-Meteo returned {}: {}",
                status, body
            )));
        }

        let om_response: OmForecastResponse = response.json().await.map_err(|e| {
            ShambaError::ProviderUnavailable(format!("Failed to parse Open-Meteo response: {}", e))
        })?;

        Ok(self.convert_response(om_response))
    }

    fn convert_response(&self, response: OmForecastResponse) -> WeatherBundle {
        let current = &response.current;
        let condition = describe_weather_code(current.weather_code).to_string();

        let converted_current = CurrentConditions {
            temperature_c: current.temperature_2m,
            humidity_percent: current.relative_humidity_2m,
            precipitation_mm: current.precipitation,
            condition,
            feels_like_c: feels_like(current.temperature_2m, current.relative_humidity_2m),
            wind_kph: current.wind_speed_10m,
            wind_direction: current.wind_direction_10m.map(|d| format!("{:.0}°", d)),
            pressure_mb: current.pressure_msl,
            uv_index: None,
        };

        let daily = &response.daily;
        let forecast: Vec<DailyOutlook> = daily
            .time
            .iter()
            .take(7)
            .enumerate()
            .map(|(i, date)| DailyOutlook {
                date: *date,
                temp_max_c: daily.temperature_2m_max.get(i).copied().unwrap_or(25.0),
                temp_min_c: daily.temperature_2m_min.get(i).copied().unwrap_or(15.0),
                precipitation_mm: daily.precipitation_sum.get(i).copied().unwrap_or(0.0),
                condition: describe_weather_code(daily.weather_code.get(i).copied().unwrap_or(0))
                    .to_string(),
            })
            .collect();

        WeatherBundle {
            current: converted_current,
            forecast,
            alerts: Vec::new(),
            provider_region: None,
            location_name: None,
        }
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderAttempt<Coordinates, WeatherBundle> for OpenMeteoClient {
    fn origin(&self) -> DataOrigin {
        DataOrigin::OpenMeteo
    }

    async fn fetch(&self, coords: &Coordinates) -> Result<WeatherBundle> {
        self.fetch_forecast(coords).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_codes_cover_rain_and_default() {
        assert_eq!(describe_weather_code(0), "Clear sky");
        assert_eq!(describe_weather_code(65), "Heavy rain");
        assert_eq!(describe_weather_code(95), "Thunderstorm");
        assert_eq!(describe_weather_code(1234), "Clear sky");
    }

    #[test]
    fn feels_like_only_rises_in_heat() {
        assert_eq!(feels_like(22.0, 90.0), 22.0);
        assert_eq!(feels_like(30.0, 60.0), 33.0);
    }

    #[test]
    fn parses_and_converts_wire_response() {
        let body = r#"{
            "current": {
                "temperature_2m": 29.0, "relative_humidity_2m": 40.0,
                "precipitation": 0.0, "weather_code": 1,
                "wind_speed_10m": 14.0, "wind_direction_10m": 120.0,
                "pressure_msl": 1013.0
            },
            "daily": {
                "time": ["2025-03-14", "2025-03-15"],
                "weather_code": [2, 61],
                "temperature_2m_max": [31.0, 28.0],
                "temperature_2m_min": [19.0, 18.0],
                "precipitation_sum": [0.0, 4.2]
            }
        }"#;
        let parsed: OmForecastResponse = serde_json::from_str(body).unwrap();
        let bundle = OpenMeteoClient::new().convert_response(parsed);
        assert_eq!(bundle.current.condition, "Mainly clear");
        assert_eq!(bundle.current.feels_like_c, 31.0);
        assert_eq!(bundle.forecast.len(), 2);
        assert_eq!(bundle.forecast[1].condition, "Slight rain");
    }
}
