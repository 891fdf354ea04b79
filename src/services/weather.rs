use crate::advisory::{AdvisoryEngine, WeatherSignals};
use crate::catalog;
use crate::config::Config;
use crate::geo;
use crate::models::{
    Coordinates, CurrentConditions, DailyOutlook, WeatherBundle, WeatherReport,
};
use crate::providers::open_meteo::feels_like;
use crate::providers::{
    synthetic_seed, OpenMeteoClient, ProviderChain, Sourced, WeatherApiClient,
};
use chrono::{DateTime, Datelike, Days, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Weather retrieval and advisory derivation. WeatherAPI.com first,
/// Open-Meteo second, deterministic synthetic last; every tier is
/// annotated with region, county, season and rule-derived advice.
pub struct WeatherService {
    chain: ProviderChain<Coordinates, WeatherBundle>,
    advisory: AdvisoryEngine,
}

impl WeatherService {
    pub fn new(config: &Config) -> Self {
        let chain = ProviderChain::new(|coords: &Coordinates| {
            synthetic_bundle(coords, Utc::now())
        })
        .with_attempt(WeatherApiClient::new(config.weatherapi.clone()))
        .with_attempt(OpenMeteoClient::new());

        Self {
            chain,
            advisory: AdvisoryEngine::new(),
        }
    }

    pub async fn report(&self, lat: f64, lng: f64) -> WeatherReport {
        let coords = Coordinates { lat, lng };
        let sourced = self.chain.fetch(&coords).await;
        self.annotate(&coords, sourced, Utc::now())
    }

    fn annotate(
        &self,
        coords: &Coordinates,
        sourced: Sourced<WeatherBundle>,
        now: DateTime<Utc>,
    ) -> WeatherReport {
        let bundle = sourced.value;

        // A provider-reported administrative region wins over the
        // bounding-box tables when it names a known zone.
        let region = match bundle.provider_region.as_deref() {
            Some(text) => geo::region_from_text(text, coords.lat, coords.lng),
            None => geo::region_from_coords(coords.lat, coords.lng),
        };
        let county = geo::county_from_coords(coords.lat, coords.lng);
        let (season, _) = catalog::season_for_month(now.month());

        let signals = WeatherSignals::from_current(&bundle.current, region);
        let (farming_advice, rule_alerts) = self.advisory.evaluate(&signals);

        let mut alerts = bundle.alerts;
        alerts.extend(rule_alerts);

        WeatherReport {
            source: sourced.origin,
            timestamp: now,
            region,
            county,
            season: season.to_string(),
            location_name: bundle.location_name,
            current: bundle.current,
            forecast: bundle.forecast,
            alerts,
            farming_advice,
        }
    }
}

/// Synthetic weather, deterministic in (coordinate, date): the zone
/// climate band fixes the temperatures and a seeded RNG draws the rain
/// days, so repeated calls on the same day agree.
pub(crate) fn synthetic_bundle(coords: &Coordinates, now: DateTime<Utc>) -> WeatherBundle {
    let region = geo::region_from_coords(coords.lat, coords.lng);
    let ((temp_min, temp_max), _) = catalog::zone_climate(region);
    let current_temp = (temp_min + temp_max) / 2.0;
    let (_, rain_chance) = catalog::season_for_month(now.month());

    let today = now.date_naive();
    let seed = synthetic_seed(&[
        coords.lat.to_string().as_bytes(),
        coords.lng.to_string().as_bytes(),
        today.to_string().as_bytes(),
    ]);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut forecast = Vec::with_capacity(7);
    for i in 0..7u64 {
        let date = today + Days::new(i);
        let rainy = rng.random::<f64>() < rain_chance;
        let precipitation_mm = if rainy {
            rng.random_range(0.0..10.0)
        } else {
            0.0
        };
        forecast.push(DailyOutlook {
            date,
            // The band narrows over the horizon to avoid implying
            // precision the model does not have.
            temp_max_c: temp_max - (i as f64 * 0.5),
            temp_min_c: temp_min + (i as f64 * 0.5),
            precipitation_mm,
            condition: if rainy { "Rainy" } else { "Sunny" }.to_string(),
        });
    }

    let humidity = 65.0;
    let current = CurrentConditions {
        temperature_c: current_temp,
        humidity_percent: humidity,
        precipitation_mm: 0.0,
        condition: "Partly Cloudy".to_string(),
        feels_like_c: feels_like(current_temp, humidity),
        wind_kph: None,
        wind_direction: None,
        pressure_mb: None,
        uv_index: None,
    };

    WeatherBundle {
        current,
        forecast,
        alerts: Vec::new(),
        provider_region: None,
        location_name: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertKind, DataOrigin, Region};
    use chrono::TimeZone;

    fn nairobi() -> Coordinates {
        Coordinates {
            lat: -1.2921,
            lng: 36.8219,
        }
    }

    fn long_rains_day() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn synthetic_is_deterministic_per_day() {
        let a = synthetic_bundle(&nairobi(), long_rains_day());
        let b = synthetic_bundle(&nairobi(), long_rains_day());
        assert_eq!(a.current.temperature_c, b.current.temperature_c);
        for (da, db) in a.forecast.iter().zip(&b.forecast) {
            assert_eq!(da.precipitation_mm, db.precipitation_mm);
            assert_eq!(da.condition, db.condition);
        }
    }

    #[test]
    fn synthetic_varies_across_coordinates() {
        let other = Coordinates {
            lat: 2.5,
            lng: 40.0,
        };
        let a = synthetic_bundle(&nairobi(), long_rains_day());
        let b = synthetic_bundle(&other, long_rains_day());
        assert_ne!(a.current.temperature_c, b.current.temperature_c);
    }

    #[test]
    fn synthetic_forecast_decays_half_degree_per_day() {
        let bundle = synthetic_bundle(&nairobi(), long_rains_day());
        assert_eq!(bundle.forecast.len(), 7);
        let first = &bundle.forecast[0];
        let last = &bundle.forecast[6];
        assert_eq!(first.temp_max_c - last.temp_max_c, 3.0);
        assert_eq!(last.temp_min_c - first.temp_min_c, 3.0);
    }

    #[test]
    fn synthetic_report_is_fully_annotated() {
        let service = WeatherService::new(&Config::default());
        let coords = Coordinates {
            lat: 2.5,
            lng: 40.0,
        };
        let sourced = Sourced {
            origin: DataOrigin::Synthetic,
            value: synthetic_bundle(&coords, long_rains_day()),
        };
        let report = service.annotate(&coords, sourced, long_rains_day());

        assert_eq!(report.source, DataOrigin::Synthetic);
        assert_eq!(report.region, Region::NorthEastern);
        assert_eq!(report.season, "Long Rains");
        assert!(!report.farming_advice.is_empty());
        // North-eastern midpoint is 32.5°C with no rain: hot-day
        // advice fires but no heat-wave alert.
        assert!(!report
            .alerts
            .iter()
            .any(|a| a.kind == AlertKind::HeatWave));
    }

    #[test]
    fn provider_region_text_wins_over_tables() {
        let service = WeatherService::new(&Config::default());
        let coords = nairobi();
        let mut bundle = synthetic_bundle(&coords, long_rains_day());
        bundle.provider_region = Some("Rift Valley".to_string());
        let sourced = Sourced {
            origin: DataOrigin::WeatherApi,
            value: bundle,
        };
        let report = service.annotate(&coords, sourced, long_rains_day());
        assert_eq!(report.region, Region::RiftValley);
    }
}
