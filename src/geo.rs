//! Table-driven resolution of a coordinate into a Kenyan county and
//! agro-ecological region. Pure lookups: no external calls, total over
//! the whole coordinate space.

use crate::catalog;
use crate::error::{Result, ShambaError};
use crate::models::{Coordinates, FarmArea, GeoContext, Region};

#[derive(Debug, Clone, Copy)]
struct BoundingBox {
    lat_min: f64,
    lat_max: f64,
    lng_min: f64,
    lng_max: f64,
}

impl BoundingBox {
    const fn new(lat_min: f64, lat_max: f64, lng_min: f64, lng_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lng_min,
            lng_max,
        }
    }

    fn contains(&self, lat: f64, lng: f64) -> bool {
        self.lat_min <= lat && lat <= self.lat_max && self.lng_min <= lng && lng <= self.lng_max
    }
}

/// Primary county boxes, tested in order.
const COUNTY_BOXES: &[(&str, BoundingBox)] = &[
    ("Nairobi", BoundingBox::new(-1.45, -1.15, 36.65, 37.05)),
    ("Kiambu", BoundingBox::new(-1.30, -0.80, 36.50, 37.20)),
    ("Nakuru", BoundingBox::new(-0.90, 0.10, 35.50, 36.50)),
    ("Kisumu", BoundingBox::new(-0.30, 0.30, 34.50, 35.20)),
    ("Mombasa", BoundingBox::new(-4.20, -3.90, 39.50, 39.80)),
    ("Machakos", BoundingBox::new(-1.80, -1.20, 37.10, 37.60)),
    ("Meru", BoundingBox::new(-0.50, 0.50, 37.50, 38.20)),
    ("Kakamega", BoundingBox::new(0.10, 0.60, 34.50, 35.10)),
    ("Uasin Gishu", BoundingBox::new(0.30, 0.80, 35.10, 35.60)),
    ("Kericho", BoundingBox::new(-0.50, 0.00, 35.00, 35.50)),
];

/// Looser fallback boxes around the major population centers, applied
/// when no primary box matches.
const COUNTY_FALLBACK_BOXES: &[(&str, BoundingBox)] = &[
    ("Nairobi", BoundingBox::new(-1.5, -1.0, 36.5, 37.0)),
    ("Kiambu", BoundingBox::new(-1.0, 0.5, 36.0, 37.0)),
    ("Nakuru", BoundingBox::new(-0.5, 0.5, 35.0, 36.0)),
    ("Kisumu", BoundingBox::new(-0.5, 0.5, 34.5, 35.5)),
    ("Mombasa", BoundingBox::new(-4.5, -3.5, 39.0, 40.0)),
];

/// Resolve a coordinate to a county name, or "Other" when no box matches.
pub fn county_from_coords(lat: f64, lng: f64) -> String {
    for (county, bbox) in COUNTY_BOXES {
        if bbox.contains(lat, lng) {
            return county.to_string();
        }
    }
    for (county, bbox) in COUNTY_FALLBACK_BOXES {
        if bbox.contains(lat, lng) {
            return county.to_string();
        }
    }
    "Other".to_string()
}

/// Resolve a coordinate to one of the six agro-ecological zones.
///
/// Boxes are tested in fixed priority order. The coastal box splits on a
/// secondary test: east of 39°E is Coastal proper; its southern interior
/// (the original "Southern" label, which carried no climate band of its
/// own) maps to Eastern, the zone with the matching semi-arid band.
pub fn region_from_coords(lat: f64, lng: f64) -> Region {
    if (-4.0..=1.0).contains(&lat) && (34.0..=41.0).contains(&lng) {
        if lng > 39.0 {
            return Region::Coastal;
        }
        if lat < -1.0 {
            return Region::Eastern;
        }
    }
    if (-1.5..=1.0).contains(&lat) && (34.0..=38.0).contains(&lng) {
        return Region::Western;
    }
    if (-1.5..=0.5).contains(&lat) && (36.0..=38.0).contains(&lng) {
        return Region::RiftValley;
    }
    if (0.0..=2.0).contains(&lat) && (36.0..=40.0).contains(&lng) {
        return Region::Eastern;
    }
    if (1.0..=4.0).contains(&lat) && (34.0..=41.0).contains(&lng) {
        return Region::NorthEastern;
    }
    if (-1.5..=0.5).contains(&lat) && (36.5..=37.5).contains(&lng) {
        return Region::CentralHighlands;
    }
    Region::CentralHighlands
}

/// Map a provider-reported administrative region name onto a zone.
/// Falls back to coordinate classification when the text matches no
/// known synonym.
pub fn region_from_text(text: &str, lat: f64, lng: f64) -> Region {
    // "North Eastern" must be tested before the "Eastern" substring.
    const SYNONYMS: &[(&str, Region)] = &[
        ("North Eastern", Region::NorthEastern),
        ("Nairobi", Region::CentralHighlands),
        ("Central", Region::CentralHighlands),
        ("Rift Valley", Region::RiftValley),
        ("Eastern", Region::Eastern),
        ("Western", Region::Western),
        ("Nyanza", Region::Western),
        ("Coast", Region::Coastal),
    ];
    for (needle, region) in SYNONYMS {
        if text.contains(needle) {
            return *region;
        }
    }
    region_from_coords(lat, lng)
}

/// Best-effort classification of a coordinate. Always succeeds; the
/// elevation is the zone estimate unless a measured value replaces it.
pub fn classify(lat: f64, lng: f64) -> GeoContext {
    let county = county_from_coords(lat, lng);
    let region = region_from_coords(lat, lng);
    GeoContext {
        latitude: lat,
        longitude: lng,
        county,
        region,
        elevation_m: catalog::zone_elevation(region),
    }
}

const EARTH_RADIUS_M: f64 = 6_371_000.0;
const SQ_METERS_PER_ACRE: f64 = 4_046.856;

/// Polygon area of a farm boundary via the shoelace formula over an
/// equirectangular projection. Adequate for field-scale polygons.
pub fn polygon_area(points: &[Coordinates]) -> Result<FarmArea> {
    if points.len() < 3 {
        return Err(ShambaError::InvalidInput(
            "need at least 3 points for area calculation".to_string(),
        ));
    }

    let mean_lat = points.iter().map(|p| p.lat).sum::<f64>() / points.len() as f64;
    let cos_lat = mean_lat.to_radians().cos();
    let project = |p: &Coordinates| {
        (
            EARTH_RADIUS_M * p.lng.to_radians() * cos_lat,
            EARTH_RADIUS_M * p.lat.to_radians(),
        )
    };

    let mut twice_area = 0.0;
    for i in 0..points.len() {
        let (x1, y1) = project(&points[i]);
        let (x2, y2) = project(&points[(i + 1) % points.len()]);
        twice_area += x1 * y2 - x2 * y1;
    }
    let area_sq_meters = (twice_area / 2.0).abs();
    let area_acres = area_sq_meters / SQ_METERS_PER_ACRE;

    Ok(FarmArea {
        area_acres: (area_acres * 100.0).round() / 100.0,
        area_hectares: (area_acres * 0.404686 * 100.0).round() / 100.0,
        area_sq_meters: (area_sq_meters * 100.0).round() / 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nairobi_resolves_to_nairobi_county() {
        assert_eq!(county_from_coords(-1.2921, 36.8219), "Nairobi");
    }

    #[test]
    fn known_county_boxes() {
        assert_eq!(county_from_coords(-0.09, 34.76), "Kisumu");
        assert_eq!(county_from_coords(-4.05, 39.66), "Mombasa");
        assert_eq!(county_from_coords(0.52, 35.27), "Uasin Gishu");
    }

    #[test]
    fn unmapped_coordinate_is_other() {
        // Lake Turkana area: no primary or fallback box.
        assert_eq!(county_from_coords(3.1, 35.9), "Other");
        // Not in Kenya at all.
        assert_eq!(county_from_coords(48.85, 2.35), "Other");
    }

    #[test]
    fn region_priority_order() {
        // East of 39°E inside the coastal box.
        assert_eq!(region_from_coords(-4.0, 39.6), Region::Coastal);
        // Southern interior share of the coastal box.
        assert_eq!(region_from_coords(-1.2921, 36.8219), Region::Eastern);
        // Lake basin.
        assert_eq!(region_from_coords(-0.09, 34.76), Region::Western);
        // Far north.
        assert_eq!(region_from_coords(3.1, 35.9), Region::NorthEastern);
    }

    #[test]
    fn classification_is_total() {
        // Every coordinate, however implausible, gets a county string and
        // one of the six regions.
        for lat in [-90.0, -4.7, -1.0, 0.0, 2.5, 5.0, 90.0] {
            for lng in [-180.0, 0.0, 33.9, 36.8, 39.5, 41.9, 180.0] {
                let ctx = classify(lat, lng);
                assert!(!ctx.county.is_empty());
                assert!(Region::all().contains(&ctx.region));
                assert!(ctx.elevation_m >= 0.0);
            }
        }
    }

    #[test]
    fn region_text_synonyms() {
        assert_eq!(
            region_from_text("Nairobi Area", 0.0, 0.0),
            Region::CentralHighlands
        );
        assert_eq!(region_from_text("Coast Province", 0.0, 0.0), Region::Coastal);
        assert_eq!(region_from_text("Nyanza", 0.0, 0.0), Region::Western);
        // "North Eastern" must not be swallowed by the "Eastern" synonym.
        assert_eq!(
            region_from_text("North Eastern Province", 0.0, 0.0),
            Region::NorthEastern
        );
        // Unknown text falls back to the coordinate tables.
        assert_eq!(region_from_text("Atlantis", -4.0, 39.6), Region::Coastal);
    }

    #[test]
    fn default_region_is_central_highlands() {
        assert_eq!(region_from_coords(48.85, 2.35), Region::CentralHighlands);
    }

    #[test]
    fn area_requires_three_points() {
        let two = vec![
            Coordinates { lat: 0.0, lng: 36.0 },
            Coordinates { lat: 0.001, lng: 36.0 },
        ];
        assert!(polygon_area(&two).is_err());
    }

    #[test]
    fn area_of_square_plot() {
        // ~111m x ~111m square at the equator: about 3 acres.
        let square = vec![
            Coordinates { lat: 0.0, lng: 36.0 },
            Coordinates { lat: 0.001, lng: 36.0 },
            Coordinates {
                lat: 0.001,
                lng: 36.001,
            },
            Coordinates { lat: 0.0, lng: 36.001 },
        ];
        let area = polygon_area(&square).unwrap();
        assert!((area.area_acres - 3.05).abs() < 0.1, "{}", area.area_acres);
        assert!(area.area_hectares < area.area_acres);
    }
}
