use crate::catalog;
use crate::config::Config;
use crate::geo;
use crate::models::{Coordinates, GeoContext};
use crate::providers::geocoding::GeocodedPlace;
use crate::providers::{OpenElevationClient, PositionStackClient, ProviderChain};

/// Coordinate resolution: reverse geocoding and elevation, each its
/// own chain, composed into one geographic context. The fallbacks are
/// the bounding-box tables and zone elevation constants, so resolution
/// never fails.
pub struct LocationService {
    geocode: ProviderChain<Coordinates, GeocodedPlace>,
    elevation: ProviderChain<Coordinates, f64>,
}

fn fallback_place(coords: &Coordinates) -> GeocodedPlace {
    let county = geo::county_from_coords(coords.lat, coords.lng);
    GeocodedPlace {
        label: Some(format!("Near {} County", county)),
        county: Some(county),
        region: None,
        locality: None,
    }
}

fn fallback_elevation(coords: &Coordinates) -> f64 {
    catalog::zone_elevation(geo::region_from_coords(coords.lat, coords.lng))
}

impl LocationService {
    pub fn new(config: &Config) -> Self {
        let geocode = ProviderChain::new(fallback_place)
            .with_attempt(PositionStackClient::new(config.positionstack.clone()));
        let elevation =
            ProviderChain::new(fallback_elevation).with_attempt(OpenElevationClient::new());
        Self { geocode, elevation }
    }

    pub async fn resolve(&self, lat: f64, lng: f64) -> GeoContext {
        let coords = Coordinates { lat, lng };
        let place = self.geocode.fetch(&coords).await.value;
        let elevation_m = self.elevation.fetch(&coords).await.value;

        let county = place
            .county
            .filter(|c| catalog::is_kenya_county(c))
            .unwrap_or_else(|| geo::county_from_coords(lat, lng));
        let region = match place.region.as_deref() {
            Some(text) => geo::region_from_text(text, lat, lng),
            None => geo::region_from_coords(lat, lng),
        };

        GeoContext {
            latitude: lat,
            longitude: lng,
            county,
            region,
            elevation_m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;

    #[test]
    fn fallback_place_names_the_matched_county() {
        let place = fallback_place(&Coordinates {
            lat: -1.2921,
            lng: 36.8219,
        });
        assert_eq!(place.county.as_deref(), Some("Nairobi"));
        assert_eq!(place.label.as_deref(), Some("Near Nairobi County"));
        assert!(place.region.is_none());
    }

    #[test]
    fn fallback_elevation_uses_zone_constants() {
        let western = fallback_elevation(&Coordinates {
            lat: 0.2827,
            lng: 34.7519,
        });
        assert_eq!(western, catalog::zone_elevation(Region::Western));
        let arid = fallback_elevation(&Coordinates {
            lat: 2.5,
            lng: 40.0,
        });
        assert_eq!(arid, catalog::zone_elevation(Region::NorthEastern));
    }
}
