//! Forecast period frequency.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Spacing between consecutive forecast periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Hourly,
    Daily,
}

impl Frequency {
    pub fn step(&self) -> Duration {
        match self {
            Frequency::Hourly => Duration::hours(1),
            Frequency::Daily => Duration::days(1),
        }
    }
}
