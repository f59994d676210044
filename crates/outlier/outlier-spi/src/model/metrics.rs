//! Training metrics reported by a successful fit.

use serde::{Deserialize, Serialize};

/// Metrics computed over the training set at fit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    pub training_samples: usize,
    pub feature_count: usize,
    /// Empirical fraction of training points flagged at the configured
    /// contamination.
    pub anomaly_rate: f64,
    /// Mean decision score among flagged points; 0 when none were flagged.
    pub avg_anomaly_score: f64,
    /// Mean decision score among unflagged points; 0 when none.
    pub avg_normal_score: f64,
    /// (min, max) decision score over the training set.
    pub score_range: (f64, f64),
    pub contamination: f64,
}
