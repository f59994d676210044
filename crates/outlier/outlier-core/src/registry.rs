//! Per-building model registry with single-flight fits.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use features::{BuildingId, Reading};
use outlier_api::DetectorConfig;
use outlier_spi::{OutlierError, OutlierReport, Result, TrainingMetrics};
use tracing::debug;

use crate::detector::FittedDetector;

/// Thread-safe store of fitted detectors, one per building.
///
/// Fits for the same building are serialized on a per-building gate;
/// fits for different buildings run independently. Training happens
/// outside the map lock and the new model is swapped in atomically, so
/// a failed fit leaves the prior model untouched and predict calls
/// never observe a partial fit.
#[derive(Debug, Default)]
pub struct DetectorRegistry {
    config: DetectorConfig,
    models: RwLock<HashMap<BuildingId, Arc<FittedDetector>>>,
    fit_gates: Mutex<HashMap<BuildingId, Arc<Mutex<()>>>>,
}

impl DetectorRegistry {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            models: RwLock::new(HashMap::new()),
            fit_gates: Mutex::new(HashMap::new()),
        }
    }

    /// Train and atomically publish a model for one building.
    pub fn fit(&self, readings: &[Reading], building_id: BuildingId) -> Result<TrainingMetrics> {
        let gate = {
            let mut gates = lock_ignore_poison(&self.fit_gates);
            gates.entry(building_id).or_default().clone()
        };
        // Single-flight: at most one in-flight fit per building.
        let _flight = gate.lock().unwrap_or_else(|e| e.into_inner());

        let fitted = FittedDetector::train(&self.config, readings, building_id)?;
        let metrics = fitted.metrics().clone();
        write_ignore_poison(&self.models).insert(building_id, Arc::new(fitted));
        debug!(building_id, "published fitted detector");
        Ok(metrics)
    }

    /// Predict with the building's current model.
    pub fn predict(&self, readings: &[Reading], building_id: BuildingId) -> Result<OutlierReport> {
        let model = self
            .get(building_id)
            .ok_or(OutlierError::NotFitted)?;
        model.predict(readings, building_id)
    }

    pub fn get(&self, building_id: BuildingId) -> Option<Arc<FittedDetector>> {
        read_ignore_poison(&self.models).get(&building_id).cloned()
    }

    /// Publish an externally restored model (e.g. from an artifact).
    pub fn insert(&self, fitted: FittedDetector) {
        write_ignore_poison(&self.models).insert(fitted.building_id(), Arc::new(fitted));
    }

    pub fn is_fitted(&self, building_id: BuildingId) -> bool {
        read_ignore_poison(&self.models).contains_key(&building_id)
    }

    pub fn remove(&self, building_id: BuildingId) -> Option<Arc<FittedDetector>> {
        write_ignore_poison(&self.models).remove(&building_id)
    }
}

fn lock_ignore_poison<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

fn read_ignore_poison<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write_ignore_poison<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}
