use crate::catalog;
use crate::models::CropRecommendation;
use crate::services::MarketService;
use std::sync::Arc;

const BASE_SCORE: f64 = 0.5;
const PRICING_THRESHOLD: f64 = 0.6;
const KG_PER_TON: f64 = 1000.0;
const COST_PER_TON_KSH: f64 = 50_000.0;

/// Ranks the national crop catalog against a farm profile. Additive
/// affinity scoring; crops clearing the threshold are priced through
/// the market model and annotated with yield and profit estimates.
pub struct RecommendationService {
    market: Arc<MarketService>,
}

impl RecommendationService {
    pub fn new(market: Arc<MarketService>) -> Self {
        Self { market }
    }

    pub fn recommend(
        &self,
        county: &str,
        soil_type: &str,
        rainfall_mm: f64,
        elevation_m: f64,
    ) -> Vec<CropRecommendation> {
        let mut ranked: Vec<CropRecommendation> = Vec::new();

        for entry in catalog::KENYA_CROPS {
            let county_listed = entry.regions.contains(&county);
            let score = suitability_score(
                entry.name,
                county_listed || entry.regions.contains(&"All"),
                soil_type,
                rainfall_mm,
                elevation_m,
            );

            if score < PRICING_THRESHOLD {
                continue;
            }

            // Crops outside the market model fall back to a nominal
            // price rather than dropping out of the ranking.
            let (price, unit) = match self.market.quote(entry.name, county) {
                Ok(quote) => (quote.price, quote.unit),
                Err(_) => (50.0, "kg".to_string()),
            };

            let estimated_yield = catalog::yield_per_acre(entry.name) * score;
            let income = estimated_yield * KG_PER_TON * price;
            let costs = estimated_yield * COST_PER_TON_KSH;
            let profit = income - costs;

            ranked.push(CropRecommendation {
                crop: entry.name.to_string(),
                suitability_score: (score * 100.0).round() / 100.0,
                county_suitable: county_listed,
                season: entry.season.to_string(),
                estimated_yield: format!("{:.1} tons/acre", estimated_yield),
                market_price: format!("KSh {:.2}/{}", price, unit),
                estimated_profit: format!("KSh {}/acre", format_thousands(profit)),
                recommended_varieties: catalog::recommended_varieties(entry.name, county),
            });
        }

        // Stable sort: catalog order breaks score ties.
        ranked.sort_by(|a, b| {
            b.suitability_score
                .partial_cmp(&a.suitability_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(5);
        ranked
    }
}

/// Affinity increments stack; the sum is clamped to 1.0 so the score
/// stays a fraction and yield estimates stay bounded.
fn suitability_score(
    crop: &str,
    county_suitable: bool,
    soil_type: &str,
    rainfall_mm: f64,
    elevation_m: f64,
) -> f64 {
    let mut score = BASE_SCORE;

    if county_suitable {
        score += 0.3;
    }

    let highland_soil = matches!(soil_type, "Volcanic" | "Loam");
    if highland_soil && matches!(crop, "Coffee" | "Tea" | "Maize") {
        score += 0.2;
    } else if soil_type == "Sandy" && matches!(crop, "Cassava" | "Pigeon Peas") {
        score += 0.2;
    }

    if rainfall_mm > 1000.0 && matches!(crop, "Rice" | "Banana" | "Sugarcane") {
        score += 0.2;
    } else if rainfall_mm < 800.0 && matches!(crop, "Sorghum" | "Millet" | "Cowpeas") {
        score += 0.2;
    }

    if elevation_m > 1500.0 && matches!(crop, "Coffee" | "Tea" | "Pyrethrum") {
        score += 0.2;
    } else if elevation_m < 1000.0 && matches!(crop, "Cassava" | "Mango" | "Cashew") {
        score += 0.2;
    }

    score.min(1.0)
}

fn format_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> RecommendationService {
        RecommendationService::new(Arc::new(MarketService::with_seed(9)))
    }

    #[test]
    fn stacked_increments_clamp_at_one() {
        // County + soil + elevation all match for Coffee in Kiambu.
        let score = suitability_score("Coffee", true, "Volcanic", 1200.0, 1800.0);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn highland_profile_ranks_coffee_first() {
        let ranked = service().recommend("Kiambu", "Volcanic", 1200.0, 1800.0);
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].crop, "Coffee");
        assert_eq!(ranked[0].suitability_score, 1.0);
        assert!(ranked[0].county_suitable);
        // Descending, with catalog order breaking the tie at 0.7.
        assert_eq!(ranked[1].crop, "Tea");
        assert_eq!(ranked[2].crop, "Beans");
        let scores: Vec<f64> = ranked.iter().map(|r| r.suitability_score).collect();
        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
        assert_eq!(scores, sorted);
    }

    #[test]
    fn dry_lowland_favors_drought_crops() {
        let ranked = service().recommend("Other", "Sandy", 500.0, 600.0);
        let names: Vec<&str> = ranked.iter().map(|r| r.crop.as_str()).collect();
        // Beans ("All" regions) leads at 0.8; the drought set follows
        // at 0.7 in catalog order.
        assert_eq!(names, vec!["Beans", "Sorghum", "Millet", "Mango"]);
    }

    #[test]
    fn sub_threshold_crops_are_not_priced() {
        // A profile matching nothing leaves only the base-score and
        // "All"-region crops; base 0.5 alone misses the threshold.
        let ranked = service().recommend("Other", "Silt", 900.0, 1200.0);
        let names: Vec<&str> = ranked.iter().map(|r| r.crop.as_str()).collect();
        assert_eq!(names, vec!["Beans"]);
    }

    #[test]
    fn yield_uses_clamped_score() {
        let ranked = service().recommend("Kiambu", "Volcanic", 1200.0, 1800.0);
        // Coffee: 2.0 tons/acre at score 1.0.
        assert_eq!(ranked[0].estimated_yield, "2.0 tons/acre");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(1234567.0), "1,234,567");
        assert_eq!(format_thousands(-900.4), "-900");
        assert_eq!(format_thousands(100.0), "100");
    }
}
