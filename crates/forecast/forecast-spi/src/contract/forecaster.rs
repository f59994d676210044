//! Forecaster trait definition.

use features::{BuildingId, Reading};

use crate::error::Result;
use crate::model::{ForecastReport, Frequency, TrainingMetrics};

/// Per-building seasonal forecaster with a fit/forecast lifecycle.
///
/// Unfitted until a successful `fit`; `forecast` before that fails
/// with `NotFitted`. A successful re-fit atomically replaces the
/// fitted state.
pub trait Forecaster: Send + Sync {
    /// Fit the seasonal model on one building's readings. Requires at
    /// least 100 points after preparation.
    fn fit(&mut self, readings: &[Reading], building_id: BuildingId) -> Result<TrainingMetrics>;

    /// Project `periods` future values at the given frequency,
    /// continuing from the last observed timestamp.
    fn forecast(&self, periods: usize, frequency: Frequency) -> Result<ForecastReport>;

    /// Whether a successful fit has occurred.
    fn is_fitted(&self) -> bool;
}
