//! Feature engineering error types.

use thiserror::Error;

/// Errors raised while validating readings or deriving features.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Result type for feature engineering operations.
pub type Result<T> = std::result::Result<T, FeatureError>;
