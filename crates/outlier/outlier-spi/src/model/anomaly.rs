//! Anomaly record, severity bands and anomaly categories.

use chrono::{DateTime, Utc};
use features::BuildingId;
use serde::{Deserialize, Serialize};

/// Severity band, assigned from the anomaly score via fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Band lookup on the ensemble decision score.
    ///
    /// Thresholds are a specified contract calibrated against the
    /// original scoring distribution; flagged for recalibration rather
    /// than derived.
    pub fn from_score(score: f64) -> Self {
        if score < -0.6 {
            Severity::Critical
        } else if score < -0.4 {
            Severity::High
        } else if score < -0.2 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

/// Category assigned by the rule cascade, first matching rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyType {
    OffHoursSpike,
    WeekendAnomaly,
    PeakHourExtreme,
    NightUsageSpike,
    UsageSpike,
    LowUsageAnomaly,
    GeneralAnomaly,
}

/// One flagged reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub timestamp: DateTime<Utc>,
    pub building_id: BuildingId,
    pub anomaly_score: f64,
    pub anomaly_type: AnomalyType,
    pub severity: Severity,
    pub energy_value: f64,
    /// The point's 24-sample moving average.
    pub expected_value: f64,
    /// Deviation from `expected_value` in percent; 0 when it is 0.
    pub deviation_percent: f64,
}
