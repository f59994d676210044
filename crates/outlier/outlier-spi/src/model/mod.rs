//! Data models for outlier detection.

mod anomaly;
mod metrics;
mod report;

pub use anomaly::{Anomaly, AnomalyType, Severity};
pub use metrics::TrainingMetrics;
pub use report::{OutlierReport, ScoreStatistics};
