//! Forecast error types.

use features::FeatureError;
use thiserror::Error;

/// Errors that can occur during forecasting operations.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Insufficient data points for the operation
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Forecaster has not been fitted
    #[error("Forecaster not fitted: call fit() before forecast()")]
    NotFitted,

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    Numerical(String),

    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] serde_json::Error),
}

/// Result type for forecasting operations.
pub type Result<T> = std::result::Result<T, ForecastError>;
