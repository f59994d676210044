//! Training diagnostics reported by a successful fit.

use serde::{Deserialize, Serialize};

/// Diagnostics from fitting the seasonal model.
///
/// A holdout backtest is attempted when the data span supports it;
/// otherwise descriptive statistics of the target are reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrainingMetrics {
    Holdout {
        /// Mean absolute percentage error over the holdout, as a fraction.
        mape: f64,
        mae: f64,
        rmse: f64,
        /// Fraction of holdout actuals inside the prediction interval.
        coverage: f64,
        training_samples: usize,
    },
    Descriptive {
        training_samples: usize,
        data_range_days: i64,
        avg_energy_usage: f64,
        energy_std: f64,
    },
}

impl TrainingMetrics {
    pub fn training_samples(&self) -> usize {
        match self {
            TrainingMetrics::Holdout {
                training_samples, ..
            }
            | TrainingMetrics::Descriptive {
                training_samples, ..
            } => *training_samples,
        }
    }
}
