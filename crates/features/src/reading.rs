//! Meter reading input types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};

/// Identifier of the building a reading belongs to.
pub type BuildingId = u32;

/// A validated meter reading for one building at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    pub building_id: BuildingId,
    /// Metered energy usage, non-negative.
    pub meter_reading: f64,
    pub air_temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub cloud_coverage: Option<f64>,
}

impl Reading {
    pub fn new(timestamp: DateTime<Utc>, building_id: BuildingId, meter_reading: f64) -> Self {
        Self {
            timestamp,
            building_id,
            meter_reading,
            air_temperature: None,
            wind_speed: None,
            cloud_coverage: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.air_temperature = Some(temperature);
        self
    }

    pub fn with_wind_speed(mut self, wind_speed: f64) -> Self {
        self.wind_speed = Some(wind_speed);
        self
    }

    pub fn with_cloud_coverage(mut self, cloud_coverage: f64) -> Self {
        self.cloud_coverage = Some(cloud_coverage);
        self
    }
}

/// A reading as it arrives from the persistence layer, before validation.
///
/// Required fields are optional here; conversion to [`Reading`] is where
/// missing-field failures surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawReading {
    pub timestamp: Option<DateTime<Utc>>,
    pub building_id: BuildingId,
    pub meter_reading: Option<f64>,
    pub air_temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub cloud_coverage: Option<f64>,
}

impl TryFrom<RawReading> for Reading {
    type Error = FeatureError;

    fn try_from(raw: RawReading) -> Result<Self> {
        let timestamp = raw
            .timestamp
            .ok_or(FeatureError::MissingField { field: "timestamp" })?;
        let meter_reading = match raw.meter_reading {
            Some(v) if v.is_finite() => v,
            // A NaN or infinite reading carries no usable value.
            _ => {
                return Err(FeatureError::MissingField {
                    field: "meter_reading",
                })
            }
        };
        if meter_reading < 0.0 {
            return Err(FeatureError::InvalidValue {
                field: "meter_reading",
                reason: format!("must be non-negative, got {meter_reading}"),
            });
        }

        Ok(Reading {
            timestamp,
            building_id: raw.building_id,
            meter_reading,
            air_temperature: raw.air_temperature,
            wind_speed: raw.wind_speed,
            cloud_coverage: raw.cloud_coverage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_raw_reading_converts() {
        let raw = RawReading {
            timestamp: Some(ts()),
            building_id: 7,
            meter_reading: Some(120.5),
            ..Default::default()
        };
        let reading = Reading::try_from(raw).unwrap();
        assert_eq!(reading.building_id, 7);
        assert_eq!(reading.meter_reading, 120.5);
    }

    #[test]
    fn test_missing_timestamp_fails() {
        let raw = RawReading {
            meter_reading: Some(1.0),
            ..Default::default()
        };
        let err = Reading::try_from(raw).unwrap_err();
        assert!(matches!(
            err,
            FeatureError::MissingField { field: "timestamp" }
        ));
    }

    #[test]
    fn test_missing_meter_reading_fails() {
        let raw = RawReading {
            timestamp: Some(ts()),
            ..Default::default()
        };
        let err = Reading::try_from(raw).unwrap_err();
        assert!(matches!(
            err,
            FeatureError::MissingField {
                field: "meter_reading"
            }
        ));
    }

    #[test]
    fn test_nan_meter_reading_counts_as_missing() {
        let raw = RawReading {
            timestamp: Some(ts()),
            meter_reading: Some(f64::NAN),
            ..Default::default()
        };
        assert!(Reading::try_from(raw).is_err());
    }

    #[test]
    fn test_negative_meter_reading_rejected() {
        let raw = RawReading {
            timestamp: Some(ts()),
            meter_reading: Some(-4.0),
            ..Default::default()
        };
        let err = Reading::try_from(raw).unwrap_err();
        assert!(matches!(err, FeatureError::InvalidValue { .. }));
    }
}
