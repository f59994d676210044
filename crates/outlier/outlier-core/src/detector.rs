//! Isolation-forest energy outlier detector.

use features::{BuildingId, FeatureEngineer, Reading};
use outlier_api::DetectorConfig;
use outlier_spi::{
    Anomaly, Detector, OutlierError, OutlierReport, Result, Severity, TrainingMetrics,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classify::classify_anomaly_type;
use crate::forest::IsolationForest;
use crate::scaler::StandardScaler;

/// Hard minimum of qualifying samples for training.
pub const MIN_TRAINING_SAMPLES: usize = 100;

/// Immutable fitted model for one building.
///
/// Holds everything predict needs: the standardization statistics and
/// feature-name list fixed at fit time, the seeded ensemble, and the
/// decision offset. Safe to share across threads without locking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedDetector {
    building_id: BuildingId,
    feature_names: Vec<String>,
    scaler: StandardScaler,
    forest: IsolationForest,
    /// Contamination quantile of the training raw scores. A point's
    /// decision score is its raw score minus this offset; negative
    /// decision scores are flagged.
    offset: f64,
    contamination: f64,
    metrics: TrainingMetrics,
}

impl FittedDetector {
    /// Train a model on one building's readings.
    pub fn train(
        config: &DetectorConfig,
        readings: &[Reading],
        building_id: BuildingId,
    ) -> Result<Self> {
        config.validate()?;

        let filtered: Vec<Reading> = readings
            .iter()
            .filter(|r| r.building_id == building_id)
            .cloned()
            .collect();
        if filtered.len() < MIN_TRAINING_SAMPLES {
            return Err(OutlierError::InsufficientData {
                required: MIN_TRAINING_SAMPLES,
                got: filtered.len(),
            });
        }

        let feature_names = FeatureEngineer::feature_names(&filtered);
        let vectors = FeatureEngineer::engineer(&filtered);
        let rows: Vec<Vec<f64>> = vectors.iter().map(|fv| fv.row(&feature_names)).collect();

        let scaler = StandardScaler::fit(&rows);
        let scaled = scaler.transform(&rows);
        let forest =
            IsolationForest::fit(&scaled, config.n_trees, config.max_samples, config.seed);

        let raw_scores = forest.score_samples(&scaled);
        let offset = percentile(&raw_scores, config.contamination);
        let decisions: Vec<f64> = raw_scores.iter().map(|s| s - offset).collect();

        let flagged: Vec<f64> = decisions.iter().copied().filter(|&d| d < 0.0).collect();
        let normal: Vec<f64> = decisions.iter().copied().filter(|&d| d >= 0.0).collect();
        let metrics = TrainingMetrics {
            training_samples: scaled.len(),
            feature_count: feature_names.len(),
            anomaly_rate: flagged.len() as f64 / scaled.len() as f64,
            avg_anomaly_score: mean_or_zero(&flagged),
            avg_normal_score: mean_or_zero(&normal),
            score_range: (
                decisions.iter().cloned().fold(f64::INFINITY, f64::min),
                decisions.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            ),
            contamination: config.contamination,
        };

        info!(
            building_id,
            samples = metrics.training_samples,
            features = metrics.feature_count,
            anomaly_rate = metrics.anomaly_rate,
            "trained isolation forest"
        );

        Ok(Self {
            building_id,
            feature_names,
            scaler,
            forest,
            offset,
            contamination: config.contamination,
            metrics,
        })
    }

    /// Score new readings for one building and classify flagged points.
    ///
    /// Empty input (after filtering) yields an empty report. A feature
    /// set differing from the one fixed at fit time fails with
    /// `FeatureMismatch`.
    pub fn predict(&self, readings: &[Reading], building_id: BuildingId) -> Result<OutlierReport> {
        let filtered: Vec<Reading> = readings
            .iter()
            .filter(|r| r.building_id == building_id)
            .cloned()
            .collect();
        if filtered.is_empty() {
            return Ok(OutlierReport::empty());
        }

        let names = FeatureEngineer::feature_names(&filtered);
        if names != self.feature_names {
            return Err(OutlierError::FeatureMismatch {
                expected: self.feature_names.join(", "),
                got: names.join(", "),
            });
        }

        let vectors = FeatureEngineer::engineer(&filtered);
        let rows: Vec<Vec<f64>> = vectors.iter().map(|fv| fv.row(&names)).collect();
        let scaled = self.scaler.transform(&rows);
        let decisions: Vec<f64> = self
            .forest
            .score_samples(&scaled)
            .iter()
            .map(|s| s - self.offset)
            .collect();

        let anomalies: Vec<Anomaly> = vectors
            .iter()
            .zip(&decisions)
            .filter(|(_, &score)| score < 0.0)
            .map(|(fv, &score)| Anomaly {
                timestamp: fv.timestamp,
                building_id: fv.building_id,
                anomaly_score: score,
                anomaly_type: classify_anomaly_type(fv),
                severity: Severity::from_score(score),
                energy_value: fv.meter_reading,
                expected_value: fv.energy_ma_24h,
                deviation_percent: fv.energy_deviation_pct,
            })
            .collect();

        debug!(
            building_id,
            anomalies = anomalies.len(),
            total = vectors.len(),
            "outlier detection completed"
        );

        Ok(OutlierReport::new(anomalies, vectors.len(), &decisions))
    }

    pub fn building_id(&self) -> BuildingId {
        self.building_id
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn metrics(&self) -> &TrainingMetrics {
        &self.metrics
    }

    pub fn contamination(&self) -> f64 {
        self.contamination
    }

}

/// Stateful detector with the Unfitted -> Fitted lifecycle.
#[derive(Debug, Default)]
pub struct EnergyOutlierDetector {
    config: DetectorConfig,
    fitted: Option<FittedDetector>,
}

impl EnergyOutlierDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            fitted: None,
        }
    }

    pub fn with_contamination(contamination: f64) -> Self {
        Self::new(DetectorConfig::new(contamination))
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// The fitted model, if a successful fit has occurred.
    pub fn fitted(&self) -> Option<&FittedDetector> {
        self.fitted.as_ref()
    }

    /// Adopt a previously fitted model (e.g. loaded from an artifact).
    pub fn restore(&mut self, fitted: FittedDetector) {
        self.fitted = Some(fitted);
    }
}

impl Detector for EnergyOutlierDetector {
    fn fit(&mut self, readings: &[Reading], building_id: BuildingId) -> Result<TrainingMetrics> {
        // A failed train leaves any prior fitted state untouched.
        let fitted = FittedDetector::train(&self.config, readings, building_id)?;
        let metrics = fitted.metrics.clone();
        self.fitted = Some(fitted);
        Ok(metrics)
    }

    fn predict(&self, readings: &[Reading], building_id: BuildingId) -> Result<OutlierReport> {
        let fitted = self.fitted.as_ref().ok_or(OutlierError::NotFitted)?;
        fitted.predict(readings, building_id)
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}

fn mean_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Linear-interpolation percentile of an unsorted slice, q in [0, 1].
fn percentile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
    }
}
