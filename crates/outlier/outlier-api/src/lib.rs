//! Outlier Detection API
//!
//! Configuration types for the isolation-forest detector.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use outlier_spi::{
    Anomaly, AnomalyType, Detector, OutlierError, OutlierReport, Result, ScoreStatistics,
    Severity, TrainingMetrics,
};

/// Isolation-forest detector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Expected fraction of outliers in training data, in (0, 0.5].
    pub contamination: f64,
    /// Number of trees in the ensemble.
    pub n_trees: usize,
    /// Fraction of training samples drawn per tree, in (0, 1].
    pub max_samples: f64,
    /// Master RNG seed, fixed at model construction for reproducibility.
    pub seed: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            contamination: 0.1,
            n_trees: 200,
            max_samples: 0.8,
            seed: 42,
        }
    }
}

impl DetectorConfig {
    pub fn new(contamination: f64) -> Self {
        Self {
            contamination,
            ..Default::default()
        }
    }

    pub fn with_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    pub fn with_max_samples(mut self, max_samples: f64) -> Self {
        self.max_samples = max_samples;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate all parameters, failing with `InvalidParameter`.
    pub fn validate(&self) -> Result<()> {
        if !(self.contamination > 0.0 && self.contamination <= 0.5) {
            return Err(OutlierError::InvalidParameter {
                name: "contamination".to_string(),
                reason: format!("must be in (0, 0.5], got {}", self.contamination),
            });
        }
        if self.n_trees == 0 {
            return Err(OutlierError::InvalidParameter {
                name: "n_trees".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if !(self.max_samples > 0.0 && self.max_samples <= 1.0) {
            return Err(OutlierError::InvalidParameter {
                name: "max_samples".to_string(),
                reason: format!("must be in (0, 1], got {}", self.max_samples),
            });
        }
        Ok(())
    }
}
