//! Error kinds surfaced by the planner core.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = PlannerError> = std::result::Result<T, E>;

/// Closed set of failures the planner can report.
///
/// The optimizer itself only produces `InsufficientPlaces`,
/// `DimensionMismatch` and `PermutationSpaceExplosion`; the remaining kinds
/// come from the collaborators around it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    #[error("at least two places are required, got {found}")]
    InsufficientPlaces { found: usize },

    #[error("distance provider failed ({status}): {message}")]
    DistanceProvider { status: String, message: String },

    #[error("distance matrix has {rows} rows but {places} places were supplied")]
    DimensionMismatch { places: usize, rows: usize },

    #[error("{places} places exceed the exhaustive search limit of {limit}")]
    PermutationSpaceExplosion { places: usize, limit: usize },

    #[error("day {index} not found (itinerary has {days} days)")]
    DayNotFound { index: usize, days: usize },

    #[error("suggestion source failed: {message}")]
    Suggestion { message: String },

    #[error("invalid check-in: {message}")]
    InvalidCheckIn { message: String },

    #[error("weather lookup failed: {message}")]
    Weather { message: String },

    #[error("invalid configuration for {key}: {message}")]
    Config { key: String, message: String },
}

impl PlannerError {
    pub(crate) fn provider(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DistanceProvider {
            status: status.into(),
            message: message.into(),
        }
    }

    /// Classify a transport failure from one of the HTTP adapters.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        let status = if err.is_timeout() {
            "TIMEOUT".to_string()
        } else if let Some(code) = err.status() {
            code.as_u16().to_string()
        } else if err.is_decode() {
            "MALFORMED_RESPONSE".to_string()
        } else {
            "NETWORK_ERROR".to_string()
        };
        // Strip the URL: it may carry an API key.
        Self::DistanceProvider {
            status,
            message: err.without_url().to_string(),
        }
    }

    /// HTTP status code the service layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InsufficientPlaces { .. } => 400,
            Self::DistanceProvider { .. } => 502,
            Self::DimensionMismatch { .. } => 500,
            Self::PermutationSpaceExplosion { .. } => 422,
            Self::DayNotFound { .. } => 404,
            Self::InvalidCheckIn { .. } => 400,
            Self::Suggestion { .. } | Self::Weather { .. } => 502,
            Self::Config { .. } => 500,
        }
    }
}
