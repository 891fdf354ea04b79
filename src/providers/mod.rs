//! Generic retrieval pattern shared by every external data domain:
//! an ordered list of provider attempts terminated by a deterministic
//! synthetic generator that never fails. "No real data available" is
//! represented by `DataOrigin::Synthetic`, not by an error.

pub mod geocoding;
pub mod open_meteo;
pub mod plant_id;
pub mod soilgrids;
pub mod weatherapi;

pub use geocoding::{OpenElevationClient, PositionStackClient};
pub use open_meteo::OpenMeteoClient;
pub use plant_id::PlantIdClient;
pub use soilgrids::SoilGridsClient;
pub use weatherapi::WeatherApiClient;

use crate::error::Result;
use crate::models::DataOrigin;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::time::Duration;

/// A value together with the provider that produced it.
#[derive(Debug, Clone)]
pub struct Sourced<T> {
    pub origin: DataOrigin,
    pub value: T,
}

/// One tier of a provider chain. `configured` lets keyed providers opt
/// out without a network round trip; `fetch` signals unavailability
/// through `Err`, which advances the chain to the next tier.
#[async_trait]
pub trait ProviderAttempt<C: Sync, T>: Send + Sync {
    fn origin(&self) -> DataOrigin;

    fn configured(&self) -> bool {
        true
    }

    /// Upper bound on a single attempt; the chain abandons the attempt
    /// and falls through when it elapses.
    fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(10)
    }

    async fn fetch(&self, ctx: &C) -> Result<T>;
}

/// Ordered attempts plus an infallible synthetic fallback. By
/// construction every `fetch` terminates with a tagged value.
pub struct ProviderChain<C: Sync, T> {
    attempts: Vec<Box<dyn ProviderAttempt<C, T>>>,
    fallback: Box<dyn Fn(&C) -> T + Send + Sync>,
}

impl<C: Sync, T> ProviderChain<C, T> {
    pub fn new(fallback: impl Fn(&C) -> T + Send + Sync + 'static) -> Self {
        Self {
            attempts: Vec::new(),
            fallback: Box::new(fallback),
        }
    }

    pub fn with_attempt(mut self, attempt: impl ProviderAttempt<C, T> + 'static) -> Self {
        self.attempts.push(Box::new(attempt));
        self
    }

    pub async fn fetch(&self, ctx: &C) -> Sourced<T> {
        for attempt in &self.attempts {
            let origin = attempt.origin();
            if !attempt.configured() {
                tracing::debug!("{} not configured, skipping", origin);
                continue;
            }
            match tokio::time::timeout(attempt.attempt_timeout(), attempt.fetch(ctx)).await {
                Ok(Ok(value)) => {
                    tracing::debug!("{} answered", origin);
                    return Sourced { origin, value };
                }
                Ok(Err(e)) => {
                    tracing::warn!("{} unavailable: {}", origin, e);
                }
                Err(_) => {
                    tracing::warn!(
                        "{} timed out after {:?}",
                        origin,
                        attempt.attempt_timeout()
                    );
                }
            }
        }
        Sourced {
            origin: DataOrigin::Synthetic,
            value: (self.fallback)(ctx),
        }
    }
}

/// Derive an RNG seed from stable inputs so synthetic readings are
/// reproducible: identical inputs always synthesize identical outputs.
pub fn synthetic_seed(parts: &[&[u8]]) -> u64 {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
