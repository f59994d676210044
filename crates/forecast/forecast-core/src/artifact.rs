//! Versioned JSON persistence for fitted forecasters.

use serde::{Deserialize, Serialize};

use features::BuildingId;
use forecast_spi::Result;

use crate::forecaster::FittedForecaster;

/// Current artifact schema version.
pub const VERSION: u32 = 1;

/// Serializable envelope around a fitted model, tagged with a schema
/// version so incompatible artifacts fail loudly on load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecasterArtifact {
    pub version: u32,
    model: FittedForecaster,
}

impl ForecasterArtifact {
    pub fn new(model: FittedForecaster) -> Self {
        ForecasterArtifact {
            version: VERSION,
            model,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn building_id(&self) -> BuildingId {
        self.model.building_id()
    }

    pub fn into_model(self) -> FittedForecaster {
        self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use features::Reading;
    use forecast_api::ForecasterConfig;
    use std::f64::consts::TAU;

    #[test]
    fn test_round_trip_preserves_model() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let readings: Vec<Reading> = (0..240)
            .map(|i| {
                let value = 100.0 + 20.0 * (TAU * (i % 24) as f64 / 24.0).sin();
                Reading::new(start + Duration::hours(i), 7, value)
            })
            .collect();
        let model = FittedForecaster::train(&ForecasterConfig::default(), &readings, 7).unwrap();

        let artifact = ForecasterArtifact::new(model.clone());
        assert_eq!(artifact.version, VERSION);
        assert_eq!(artifact.building_id(), 7);

        let json = artifact.to_json().unwrap();
        let restored = ForecasterArtifact::from_json(&json).unwrap().into_model();
        assert_eq!(restored, model);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(ForecasterArtifact::from_json("{not json").is_err());
    }
}
