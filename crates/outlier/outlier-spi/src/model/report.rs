//! Outlier detection report types.

use serde::{Deserialize, Serialize};

use super::Anomaly;

/// Aggregate statistics over the decision scores of one predict call.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreStatistics {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl ScoreStatistics {
    pub fn from_scores(scores: &[f64]) -> Self {
        if scores.is_empty() {
            return Self::default();
        }
        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let std = (scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n).sqrt();
        let min = scores.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Self { mean, std, min, max }
    }
}

/// Result of one predict call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub anomalies: Vec<Anomaly>,
    pub anomaly_count: usize,
    pub total_points: usize,
    /// `anomaly_count / total_points`, 0 for empty input.
    pub anomaly_rate: f64,
    pub score_statistics: ScoreStatistics,
}

impl OutlierReport {
    pub fn new(anomalies: Vec<Anomaly>, total_points: usize, scores: &[f64]) -> Self {
        let anomaly_count = anomalies.len();
        let anomaly_rate = if total_points > 0 {
            anomaly_count as f64 / total_points as f64
        } else {
            0.0
        };
        Self {
            anomalies,
            anomaly_count,
            total_points,
            anomaly_rate,
            score_statistics: ScoreStatistics::from_scores(scores),
        }
    }

    /// Report for an empty predict input.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0, &[])
    }
}
