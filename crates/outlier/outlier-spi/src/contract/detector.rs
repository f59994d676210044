//! Detector trait definition.

use features::{BuildingId, Reading};

use crate::error::Result;
use crate::model::{OutlierReport, TrainingMetrics};

/// Per-building outlier detector with a fit/predict lifecycle.
///
/// A detector is unfitted until a successful `fit`; `predict` before
/// that fails with `NotFitted`. A successful re-fit atomically replaces
/// the fitted state.
pub trait Detector: Send + Sync {
    /// Train on readings for one building. Requires at least 100
    /// samples for the target building after filtering.
    fn fit(&mut self, readings: &[Reading], building_id: BuildingId) -> Result<TrainingMetrics>;

    /// Score new readings against the fitted model and classify the
    /// flagged points.
    fn predict(&self, readings: &[Reading], building_id: BuildingId) -> Result<OutlierReport>;

    /// Whether a successful fit has occurred.
    fn is_fitted(&self) -> bool;
}
