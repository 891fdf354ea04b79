use crate::config::{ApiKeyConfig, PLANT_ID_PLACEHOLDER};
use crate::error::{Result, ShambaError};
use crate::models::{DataOrigin, DiseaseSeverity};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::ProviderAttempt;

const API_BASE_URL: &str = "https://api.plant.id/v2";

/// Request context for the disease chain: the crop under inspection
/// plus at most one image form.
#[derive(Debug, Clone)]
pub struct DiseaseQuery {
    pub crop: String,
    pub image_base64: Option<String>,
    pub image_url: Option<String>,
}

impl DiseaseQuery {
    pub fn has_image(&self) -> bool {
        self.image_base64.is_some() || self.image_url.is_some()
    }
}

/// Provider-agnostic identification outcome, before the service stamps
/// the crop and origin onto it.
#[derive(Debug, Clone)]
pub struct DiseaseFindings {
    pub disease: String,
    pub symptoms: String,
    pub severity: DiseaseSeverity,
    pub confidence: f64,
    pub is_healthy: bool,
    pub recommendations: Vec<String>,
}

/// Plant.id identification client. Keyed; image analysis is slow, so
/// it gets the longest attempt window in the codebase.
pub struct PlantIdClient {
    client: reqwest::Client,
    config: ApiKeyConfig,
    base_url: String,
}

// Plant.id response structures
#[derive(Debug, Deserialize)]
struct PiResponse {
    #[serde(default)]
    suggestions: Vec<PiSuggestion>,
}

#[derive(Debug, Deserialize)]
struct PiSuggestion {
    #[serde(default)]
    probability: Option<f64>,
    #[serde(default)]
    diseases: Vec<PiDisease>,
}

#[derive(Debug, Deserialize)]
struct PiDisease {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    disease_details: Option<PiDiseaseDetails>,
}

#[derive(Debug, Deserialize)]
struct PiDiseaseDetails {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    treatment: Option<PiTreatment>,
}

#[derive(Debug, Deserialize)]
struct PiTreatment {
    #[serde(default)]
    description: Option<String>,
}

impl PlantIdClient {
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

    async fn identify(&self, query: &DiseaseQuery) -> Result<DiseaseFindings> {
        let images: Vec<&String> = query
            .image_base64
            .iter()
            .chain(query.image_url.iter())
            .take(1)
            .collect();

        let payload = json!({
            "images": images,
            "plant_details": ["common_names", "wiki_description"],
            "disease_details": ["common_names", "description", "treatment"],
        });

        let response = self
            .client
            .post(format!("{}/identify", self.base_url))
            .header("Api-Key", &self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ShambaError::ProviderUnavailable(format!("Plant.id: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ShambaError::ProviderUnavailable(format!(
                "Plant.id returned {}: {}",
                status, body
            )));
        }

        let pi_response: PiResponse = response.json().await.map_err(|e| {
            ShambaError::ProviderUnavailable(format!("Failed to parse Plant.id response: {}", e))
        })?;

        let suggestion = pi_response.suggestions.into_iter().next().ok_or_else(|| {
            ShambaError::ProviderUnavailable("Plant.id returned no suggestions".to_string())
        })?;

        Ok(convert_suggestion(suggestion))
    }
}

fn convert_suggestion(suggestion: PiSuggestion) -> DiseaseFindings {
    let confidence = suggestion.probability.unwrap_or(0.7);

    let mut diseases = Vec::new();
    let mut symptoms = None;
    let mut treatments: Vec<String> = Vec::new();
    for disease in suggestion.diseases {
        diseases.push(
            disease
                .name
                .unwrap_or_else(|| "Unknown Disease".to_string()),
        );
        if let Some(details) = disease.disease_details {
            if symptoms.is_none() {
                symptoms = details.description;
            }
            if let Some(treatment) = details.treatment.and_then(|t| t.description) {
                treatments.extend(treatment.split(". ").map(|s| s.to_string()));
            }
        }
    }
    treatments.truncate(5);

    let is_healthy = diseases.is_empty();
    let severity = if is_healthy {
        DiseaseSeverity::None
    } else if confidence > 0.8 {
        DiseaseSeverity::High
    } else {
        DiseaseSeverity::Low
    };

    DiseaseFindings {
        disease: diseases
            .into_iter()
            .next()
            .unwrap_or_else(|| "Healthy".to_string()),
        symptoms: symptoms.unwrap_or_else(|| {
            if is_healthy {
                "Plant appears healthy".to_string()
            } else {
                "See detailed description".to_string()
            }
        }),
        severity,
        confidence,
        is_healthy,
        recommendations: treatments,
    }
}

#[async_trait]
impl ProviderAttempt<DiseaseQuery, DiseaseFindings> for PlantIdClient {
    fn origin(&self) -> DataOrigin {
        DataOrigin::PlantId
    }

    fn configured(&self) -> bool {
        self.config.is_configured(PLANT_ID_PLACEHOLDER)
    }

    fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(30)
    }

    async fn fetch(&self, query: &DiseaseQuery) -> Result<DiseaseFindings> {
        if !query.has_image() {
            return Err(ShambaError::ProviderUnavailable(
                "no image supplied for identification".to_string(),
            ));
        }
        self.identify(query).await
    }
}
