//! Engineered feature vector per reading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reading::BuildingId;

/// Features always produced, in model column order.
pub const BASE_FEATURES: [&str; 20] = [
    "meter_reading",
    "hour",
    "day_of_week",
    "month",
    "is_weekend",
    "is_business_hours",
    "hour_sin",
    "hour_cos",
    "day_sin",
    "day_cos",
    "energy_ma_6h",
    "energy_ma_24h",
    "energy_std_24h",
    "energy_max_24h",
    "energy_min_24h",
    "energy_lag_1h",
    "energy_lag_24h",
    "energy_deviation_from_ma",
    "energy_deviation_pct",
    "energy_zscore",
];

/// One engineered feature vector, parallel to one input reading.
///
/// Calendar fields, cyclical encodings, causal rolling statistics, lags
/// and deviation metrics. Weather fields are carried only when the input
/// sequence carries them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub timestamp: DateTime<Utc>,
    pub building_id: BuildingId,

    pub meter_reading: f64,
    pub hour: u32,
    pub day_of_week: u32,
    pub month: u32,
    pub is_weekend: bool,
    pub is_business_hours: bool,

    pub hour_sin: f64,
    pub hour_cos: f64,
    pub day_sin: f64,
    pub day_cos: f64,

    pub energy_ma_6h: f64,
    pub energy_ma_24h: f64,
    pub energy_std_24h: f64,
    pub energy_max_24h: f64,
    pub energy_min_24h: f64,

    pub energy_lag_1h: f64,
    pub energy_lag_24h: f64,

    pub energy_deviation_from_ma: f64,
    /// Deviation from the 24-sample moving average, in percent.
    /// 0 when the moving average is 0.
    pub energy_deviation_pct: f64,
    /// Deviation over the 24-sample rolling std. 0 when the std is 0.
    pub energy_zscore: f64,

    pub air_temperature: Option<f64>,
    /// Absolute deviation from the 168-sample causal temperature mean.
    pub temp_deviation: Option<f64>,
    pub wind_speed: Option<f64>,
    pub cloud_coverage: Option<f64>,
}

impl FeatureVector {
    /// Look up a feature by its model column name.
    ///
    /// Missing optional weather values resolve to 0 so that a partially
    /// populated sequence still yields a dense matrix.
    pub fn value(&self, name: &str) -> Option<f64> {
        let v = match name {
            "meter_reading" => self.meter_reading,
            "hour" => self.hour as f64,
            "day_of_week" => self.day_of_week as f64,
            "month" => self.month as f64,
            "is_weekend" => self.is_weekend as u8 as f64,
            "is_business_hours" => self.is_business_hours as u8 as f64,
            "hour_sin" => self.hour_sin,
            "hour_cos" => self.hour_cos,
            "day_sin" => self.day_sin,
            "day_cos" => self.day_cos,
            "energy_ma_6h" => self.energy_ma_6h,
            "energy_ma_24h" => self.energy_ma_24h,
            "energy_std_24h" => self.energy_std_24h,
            "energy_max_24h" => self.energy_max_24h,
            "energy_min_24h" => self.energy_min_24h,
            "energy_lag_1h" => self.energy_lag_1h,
            "energy_lag_24h" => self.energy_lag_24h,
            "energy_deviation_from_ma" => self.energy_deviation_from_ma,
            "energy_deviation_pct" => self.energy_deviation_pct,
            "energy_zscore" => self.energy_zscore,
            "air_temperature" => self.air_temperature.unwrap_or(0.0),
            "temp_deviation" => self.temp_deviation.unwrap_or(0.0),
            "wind_speed" => self.wind_speed.unwrap_or(0.0),
            "cloud_coverage" => self.cloud_coverage.unwrap_or(0.0),
            _ => return None,
        };
        Some(v)
    }

    /// Assemble a dense row in the given column order.
    pub fn row(&self, names: &[String]) -> Vec<f64> {
        names
            .iter()
            .map(|n| self.value(n).unwrap_or(0.0))
            .collect()
    }
}
