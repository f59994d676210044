//! Forecast Service Provider Interface
//!
//! Defines traits and types for per-building seasonal energy forecasting.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::Forecaster;
pub use error::{ForecastError, Result};
pub use model::{
    ForecastPoint, ForecastReport, ForecastSummary, Frequency, ModelInfo, TrainingMetrics, Trend,
};
