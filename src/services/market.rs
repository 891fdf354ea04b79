use crate::catalog;
use crate::error::{Result, ShambaError};
use crate::models::{PricePoint, PriceQuote, PriceTrend};
use chrono::{DateTime, Datelike, Days, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

const CURRENCY: &str = "KSh";
const HISTORY_DAYS: u64 = 30;

/// Model-based market pricing: no external provider exists for Kenyan
/// produce prices, so quotes are synthesized from base bands plus
/// seasonal, regional and daily-noise adjustments. Unknown crops are
/// rejected rather than silently priced.
pub struct MarketService {
    rng: Mutex<StdRng>,
}

impl MarketService {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Fixed-seed constructor for reproducible quotes in tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn quote(&self, crop: &str, county: &str) -> Result<PriceQuote> {
        self.quote_at(crop, county, Utc::now())
    }

    fn quote_at(&self, crop: &str, county: &str, now: DateTime<Utc>) -> Result<PriceQuote> {
        let band = catalog::price_band(crop).ok_or_else(|| {
            ShambaError::InvalidInput(format!("no market model for crop '{}'", crop))
        })?;

        let seasonal_factor = catalog::seasonal_factor(crop, now.month());
        let regional_factor = catalog::regional_factor(county);

        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        let mut price = band.midpoint() * seasonal_factor * regional_factor;
        price += rng.random_range(-5.0..5.0);
        // Adjustments never push the quote outside the crop's natural
        // range.
        price = price.clamp(band.min, band.max);
        price = (price * 100.0).round() / 100.0;

        // Rising seasons lean the trend draw upward.
        let trend = draw_trend(&mut rng, seasonal_factor > 1.0);
        let history = synthesize_history(&mut rng, now);
        drop(rng);

        Ok(PriceQuote {
            crop: crop.to_string(),
            price,
            currency: CURRENCY.to_string(),
            unit: band.unit.to_string(),
            market: format!("{} Main Market", county),
            county: county.to_string(),
            trend,
            seasonal_factor,
            regional_factor,
            advice: market_advice(crop, trend),
            history,
            timestamp: now,
        })
    }
}

impl Default for MarketService {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_trend(rng: &mut StdRng, rising_season: bool) -> PriceTrend {
    let weights: [f64; 3] = if rising_season {
        [0.4, 0.3, 0.3]
    } else {
        [0.3, 0.4, 0.3]
    };
    let draw: f64 = rng.random();
    if draw < weights[0] {
        PriceTrend::Up
    } else if draw < weights[0] + weights[1] {
        PriceTrend::Down
    } else {
        PriceTrend::Stable
    }
}

/// Thirty trailing days around an independent random base, newest
/// first. Deliberately not anchored to the quoted price.
fn synthesize_history(rng: &mut StdRng, now: DateTime<Utc>) -> Vec<PricePoint> {
    let base_price: f64 = rng.random_range(1000.0..5000.0);
    let today = now.date_naive();

    (0..HISTORY_DAYS)
        .map(|i| {
            let variation: f64 = rng.random_range(-0.05..0.05);
            let price = base_price * (1.0 + variation);
            PricePoint {
                date: today - Days::new(i),
                price: (price * 100.0).round() / 100.0,
                volume: rng.random_range(100..=1000),
            }
        })
        .collect()
}

fn market_advice(crop: &str, trend: PriceTrend) -> Vec<String> {
    let mut advice: Vec<String> = match trend {
        PriceTrend::Up => vec![
            "Good time to sell if you have stock".to_string(),
            "Consider holding for better prices if storage available".to_string(),
        ],
        PriceTrend::Down => vec![
            "Good time to buy for consumption".to_string(),
            "Consider waiting to sell if possible".to_string(),
        ],
        PriceTrend::Stable => vec!["Prices stable - buy/sell as needed".to_string()],
    };

    match crop {
        "Maize" => advice.push("Check NCPB prices for maize".to_string()),
        "Tea" | "Coffee" => advice.push("Check auction prices at Nairobi auction".to_string()),
        _ => {}
    }

    advice
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn harvest_month() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 15, 10, 0, 0).unwrap()
    }

    fn planting_month() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn unknown_crop_is_rejected() {
        let service = MarketService::with_seed(1);
        let err = service.quote("Dragonfruit", "Nairobi").unwrap_err();
        assert!(matches!(err, ShambaError::InvalidInput(_)));
    }

    #[test]
    fn price_stays_inside_band_under_all_factors() {
        let service = MarketService::with_seed(7);
        // Garissa carries the largest regional factor; run a spread of
        // draws and months to stress the clamp.
        for month in 1..=12u32 {
            let now = Utc.with_ymd_and_hms(2025, month, 10, 8, 0, 0).unwrap();
            for crop in ["Maize", "Coffee", "Tomatoes", "Banana"] {
                let quote = service.quote_at(crop, "Garissa", now).unwrap();
                let band = catalog::price_band(crop).unwrap();
                assert!(
                    quote.price >= band.min && quote.price <= band.max,
                    "{} in month {} quoted {} outside [{}, {}]",
                    crop,
                    month,
                    quote.price,
                    band.min,
                    band.max
                );
            }
        }
    }

    #[test]
    fn factors_reflect_season_and_county() {
        let service = MarketService::with_seed(3);
        let harvest = service.quote_at("Maize", "Nairobi", harvest_month()).unwrap();
        assert_eq!(harvest.seasonal_factor, 0.8);
        assert_eq!(harvest.regional_factor, 1.2);

        let planting = service.quote_at("Maize", "Kitui", planting_month()).unwrap();
        assert_eq!(planting.seasonal_factor, 1.2);
        assert_eq!(planting.regional_factor, 1.0);
    }

    #[test]
    fn history_has_thirty_bounded_points() {
        let service = MarketService::with_seed(11);
        let quote = service.quote_at("Beans", "Nakuru", harvest_month()).unwrap();
        assert_eq!(quote.history.len(), 30);
        for point in &quote.history {
            assert!((100..=1000).contains(&point.volume));
            assert!(point.price > 0.0);
        }
        assert_eq!(quote.history[0].date, harvest_month().date_naive());
    }

    #[test]
    fn maize_advice_mentions_ncpb() {
        let service = MarketService::with_seed(5);
        let quote = service.quote_at("Maize", "Nairobi", harvest_month()).unwrap();
        assert!(quote.advice.iter().any(|a| a.contains("NCPB")));
    }

    #[test]
    fn seeded_service_is_reproducible() {
        let a = MarketService::with_seed(42)
            .quote_at("Tea", "Kericho", harvest_month())
            .unwrap();
        let b = MarketService::with_seed(42)
            .quote_at("Tea", "Kericho", harvest_month())
            .unwrap();
        assert_eq!(a.price, b.price);
        assert_eq!(a.trend, b.trend);
    }
}
