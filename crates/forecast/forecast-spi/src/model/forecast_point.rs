//! Single forecast period.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One forecast period with its prediction interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub predicted_value: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Interval width the bounds were computed at, e.g. 0.95.
    pub confidence_level: f64,
}
