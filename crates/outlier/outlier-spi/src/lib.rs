//! Outlier Detection Service Provider Interface
//!
//! Defines traits and types for per-building energy outlier detection.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::Detector;
pub use error::{OutlierError, Result};
pub use model::{
    Anomaly, AnomalyType, OutlierReport, ScoreStatistics, Severity, TrainingMetrics,
};
