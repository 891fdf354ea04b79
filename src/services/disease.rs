use crate::config::Config;
use crate::models::{DiseaseDetection, DiseaseSeverity};
use crate::providers::plant_id::{DiseaseFindings, DiseaseQuery};
use crate::providers::{synthetic_seed, PlantIdClient, ProviderChain};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Disease identification. Plant.id first when an image and key are
/// available; otherwise a hash-based classifier over the known Kenyan
/// disease tables. The hash tier is a pure function of the image
/// bytes, so re-submitting a photo always yields the same diagnosis.
pub struct DiseaseService {
    chain: ProviderChain<DiseaseQuery, DiseaseFindings>,
}

struct DiseaseEntry {
    name: &'static str,
    symptoms: &'static str,
    severity: DiseaseSeverity,
}

/// Known diseases per crop; the last entry is always Healthy so the
/// hash classifier can index the table uniformly.
fn disease_table(crop: &str) -> &'static [DiseaseEntry] {
    match crop {
        "Maize" => &[
            DiseaseEntry {
                name: "Maize Lethal Necrosis",
                symptoms: "Yellow streaks, stunted growth, dead heart",
                severity: DiseaseSeverity::High,
            },
            DiseaseEntry {
                name: "Maize Streak Virus",
                symptoms: "Yellow streaks on leaves, stunted growth",
                severity: DiseaseSeverity::Medium,
            },
            DiseaseEntry {
                name: "Grey Leaf Spot",
                symptoms: "Rectangular grey spots with yellow halos",
                severity: DiseaseSeverity::Medium,
            },
            DiseaseEntry {
                name: "Northern Corn Leaf Blight",
                symptoms: "Long elliptical gray-green lesions",
                severity: DiseaseSeverity::Medium,
            },
            DiseaseEntry {
                name: "Healthy",
                symptoms: "Vigorous growth, dark green leaves",
                severity: DiseaseSeverity::None,
            },
        ],
        "Coffee" => &[
            DiseaseEntry {
                name: "Coffee Berry Disease",
                symptoms: "Dark sunken spots on berries",
                severity: DiseaseSeverity::High,
            },
            DiseaseEntry {
                name: "Coffee Leaf Rust",
                symptoms: "Orange powdery spots on leaves",
                severity: DiseaseSeverity::High,
            },
            DiseaseEntry {
                name: "Coffee Wilt Disease",
                symptoms: "Wilting, yellowing leaves",
                severity: DiseaseSeverity::High,
            },
            DiseaseEntry {
                name: "Healthy",
                symptoms: "Shiny dark green leaves, good berry set",
                severity: DiseaseSeverity::None,
            },
        ],
        _ => &[DiseaseEntry {
            name: "Healthy",
            symptoms: "No visible disease symptoms",
            severity: DiseaseSeverity::None,
        }],
    }
}

fn treatment_recommendations(disease: &str) -> Vec<String> {
    let picks: &[&str] = match disease {
        "Maize Lethal Necrosis" => &[
            "Use certified disease-free seeds",
            "Practice crop rotation with non-cereals",
            "Remove and destroy infected plants",
            "Control insect vectors (aphids, thrips)",
        ],
        "Coffee Berry Disease" => &[
            "Apply copper-based fungicides",
            "Prune for better air circulation",
            "Use resistant varieties (Ruiru 11, Batian)",
            "Timely harvesting",
        ],
        "Healthy" => &[
            "Continue good agricultural practices",
            "Regular monitoring",
            "Maintain soil health",
            "Practice crop rotation",
        ],
        _ => &[
            "Consult agricultural extension officer",
            "Visit nearest KALRO station",
            "Contact county agriculture office",
        ],
    };
    picks.iter().map(|p| p.to_string()).collect()
}

impl DiseaseService {
    pub fn new(config: &Config) -> Self {
        let chain = ProviderChain::new(synthetic_findings)
            .with_attempt(PlantIdClient::new(config.plant_id.clone()));

        Self { chain }
    }

    pub async fn detect(
        &self,
        crop: &str,
        image_base64: Option<String>,
        image_url: Option<String>,
    ) -> DiseaseDetection {
        let query = DiseaseQuery {
            crop: crop.to_string(),
            image_base64,
            image_url,
        };
        let sourced = self.chain.fetch(&query).await;
        let findings = sourced.value;

        DiseaseDetection {
            source: sourced.origin,
            crop: crop.to_string(),
            disease: findings.disease,
            symptoms: findings.symptoms,
            severity: findings.severity,
            confidence: findings.confidence,
            is_healthy: findings.is_healthy,
            recommendations: findings.recommendations,
        }
    }
}

/// Hash classifier: 70% of the hash space maps to the Healthy entry,
/// the remainder indexes the crop's disease list. Without an image the
/// draw is seeded by crop and date instead.
fn synthetic_findings(query: &DiseaseQuery) -> DiseaseFindings {
    let table = disease_table(&query.crop);

    let (entry, confidence) = if let Some(image) = query
        .image_base64
        .as_deref()
        .or(query.image_url.as_deref())
    {
        let hash = synthetic_seed(&[image.as_bytes()]);
        let index = if hash % 10 < 7 || table.len() == 1 {
            table.len() - 1
        } else {
            (hash % (table.len() as u64 - 1)) as usize
        };
        let confidence = 0.85 + (hash % 100) as f64 / 1000.0;
        (&table[index], confidence)
    } else {
        let seed = synthetic_seed(&[
            query.crop.as_bytes(),
            Utc::now().date_naive().to_string().as_bytes(),
        ]);
        let mut rng = StdRng::seed_from_u64(seed);
        let entry = &table[rng.random_range(0..table.len())];
        let confidence = if entry.name == "Healthy" {
            rng.random_range(0.85..0.98)
        } else {
            rng.random_range(0.75..0.95)
        };
        (entry, confidence)
    };

    DiseaseFindings {
        disease: entry.name.to_string(),
        symptoms: entry.symptoms.to_string(),
        severity: entry.severity,
        confidence: (confidence * 100.0).round() / 100.0,
        is_healthy: entry.name == "Healthy",
        recommendations: treatment_recommendations(entry.name),
    }
}
