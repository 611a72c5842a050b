use crate::ephemeris::{EphemerisError, PlanetId};
use serde::Serialize;
use thiserror::Error;

/// Failures of chart computation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// Bad date, latitude or longitude; the message is user-facing
    #[error("{0}")]
    InvalidInput(String),
    #[error("Failed to compute position of {body}: {source}")]
    Computation {
        body: PlanetId,
        #[source]
        source: EphemerisError,
    },
}

impl ChartError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Serialized shape of a failed chart: `{error: true, message, details}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFailure {
    pub error: bool,
    pub message: String,
    pub details: String,
}

impl From<&ChartError> for ChartFailure {
    fn from(err: &ChartError) -> Self {
        Self {
            error: true,
            message: err.to_string(),
            details: format!("{:?}", err),
        }
    }
}
