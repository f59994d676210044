//! Forecast report types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ForecastPoint, TrainingMetrics};

/// Direction of the forecast horizon, from comparing the mean of its
/// first half against its second half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    /// `increasing` when the second half exceeds the first by more than
    /// 5%, `decreasing` when it is more than 5% lower, else `stable`.
    pub fn from_halves(first_half_mean: f64, second_half_mean: f64) -> Self {
        if first_half_mean == 0.0 {
            return Trend::Stable;
        }
        let change_percent = (second_half_mean - first_half_mean) / first_half_mean * 100.0;
        if change_percent > 5.0 {
            Trend::Increasing
        } else if change_percent < -5.0 {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }

    pub fn from_series(values: &[f64]) -> Self {
        if values.len() < 2 {
            return Trend::Stable;
        }
        let mid = values.len() / 2;
        let first = values[..mid].iter().sum::<f64>() / mid as f64;
        let second = values[mid..].iter().sum::<f64>() / (values.len() - mid) as f64;
        Self::from_halves(first, second)
    }
}

/// Aggregates over one forecast horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub total_predicted: f64,
    pub average_predicted: f64,
    /// Mean width of the prediction interval.
    pub confidence_interval_width: f64,
    pub trend: Trend,
    /// Timestamp of the highest-predicted period.
    pub peak_period: DateTime<Utc>,
    /// Timestamp of the lowest-predicted period.
    pub trough_period: DateTime<Utc>,
}

/// Description of the fitted model accompanying a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub seasonal_components: Vec<String>,
    pub regressors: Vec<String>,
    pub training_metrics: TrainingMetrics,
}

/// Result of one forecast call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub forecast: Vec<ForecastPoint>,
    pub summary: ForecastSummary,
    pub model_info: ModelInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_increasing_at_ten_percent() {
        assert_eq!(Trend::from_halves(100.0, 110.0), Trend::Increasing);
    }

    #[test]
    fn test_trend_stable_at_three_percent() {
        assert_eq!(Trend::from_halves(100.0, 103.0), Trend::Stable);
    }

    #[test]
    fn test_trend_five_percent_is_stable() {
        // The rule is strictly more than 5%.
        assert_eq!(Trend::from_halves(100.0, 105.0), Trend::Stable);
        assert_eq!(Trend::from_halves(100.0, 95.0), Trend::Stable);
    }

    #[test]
    fn test_trend_decreasing() {
        assert_eq!(Trend::from_halves(100.0, 90.0), Trend::Decreasing);
    }

    #[test]
    fn test_trend_zero_first_half_is_stable() {
        assert_eq!(Trend::from_halves(0.0, 50.0), Trend::Stable);
    }

    #[test]
    fn test_trend_from_series_splits_at_midpoint() {
        let values = vec![100.0, 100.0, 120.0, 120.0];
        assert_eq!(Trend::from_series(&values), Trend::Increasing);
        assert_eq!(Trend::from_series(&[100.0]), Trend::Stable);
    }

    #[test]
    fn test_trend_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Trend::Increasing).unwrap(),
            "\"increasing\""
        );
    }
}
