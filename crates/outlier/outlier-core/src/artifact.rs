//! Persistable model artifact.
//!
//! A fitted model serialized as an opaque JSON bundle, keyed by
//! building id and a format version tag. Callers store and reload the
//! blob; reloading reproduces predictions bit for bit.

use features::BuildingId;
use outlier_spi::Result;
use serde::{Deserialize, Serialize};

use crate::detector::FittedDetector;

/// Versioned wrapper around a fitted detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorArtifact {
    pub version: u32,
    pub model: FittedDetector,
}

impl DetectorArtifact {
    /// Current artifact format version.
    pub const VERSION: u32 = 1;

    pub fn new(model: FittedDetector) -> Self {
        Self {
            version: Self::VERSION,
            model,
        }
    }

    pub fn building_id(&self) -> BuildingId {
        self.model.building_id()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_model(self) -> FittedDetector {
        self.model
    }
}
