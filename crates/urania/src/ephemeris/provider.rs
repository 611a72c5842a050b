use crate::ephemeris::types::PlanetId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur while looking up body positions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("No position available for {planet} at {datetime}")]
    UnsupportedBody {
        planet: PlanetId,
        datetime: DateTime<Utc>,
    },
    #[error("Failed to calculate position for {planet} at {datetime}: {message}")]
    CalculationFailed {
        planet: PlanetId,
        datetime: DateTime<Utc>,
        message: String,
    },
}

/// Source of geocentric ecliptic longitudes.
///
/// Implementations return the raw longitude in degrees; callers normalize.
/// Lookups for different bodies share no state and may run in any order.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn longitude(&self, body: PlanetId, at: DateTime<Utc>) -> Result<f64, EphemerisError>;
}

#[async_trait]
impl<P: PositionProvider + ?Sized> PositionProvider for std::sync::Arc<P> {
    async fn longitude(&self, body: PlanetId, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        (**self).longitude(body, at).await
    }
}

/// Provider backed by a fixed longitude table, independent of time.
///
/// Used for deterministic runs, fixtures and benchmarks.
#[derive(Debug, Clone, Default)]
pub struct FixedPositionProvider {
    longitudes: HashMap<PlanetId, f64>,
}

impl FixedPositionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a raw (unnormalized) longitude
    pub fn with(mut self, body: PlanetId, longitude: f64) -> Self {
        self.longitudes.insert(body, longitude);
        self
    }
}

impl FromIterator<(PlanetId, f64)> for FixedPositionProvider {
    fn from_iter<I: IntoIterator<Item = (PlanetId, f64)>>(iter: I) -> Self {
        Self {
            longitudes: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl PositionProvider for FixedPositionProvider {
    async fn longitude(&self, body: PlanetId, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        self.longitudes
            .get(&body)
            .copied()
            .ok_or(EphemerisError::UnsupportedBody {
                planet: body,
                datetime: at,
            })
    }
}
