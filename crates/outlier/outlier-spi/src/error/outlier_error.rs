//! Outlier detection error types.

use features::FeatureError;
use thiserror::Error;

/// Outlier detection errors.
///
/// All failures are raised synchronously from the call that triggers
/// them; nothing is retried internally.
#[derive(Debug, Error)]
pub enum OutlierError {
    #[error("Insufficient data: required {required}, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("Detector not fitted: call fit() before predict()")]
    NotFitted,

    #[error("Feature mismatch: model was fitted on [{expected}], got [{got}]")]
    FeatureMismatch { expected: String, got: String },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] serde_json::Error),
}

/// Result type for outlier detection operations.
pub type Result<T> = std::result::Result<T, OutlierError>;
