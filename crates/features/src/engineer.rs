//! Feature engineering over time-ordered reading sequences.

use std::f64::consts::PI;

use chrono::{Datelike, Timelike};

use crate::error::Result;
use crate::reading::{RawReading, Reading};
use crate::vector::{FeatureVector, BASE_FEATURES};

/// Window sizes are counts of prior samples, not wall-clock durations.
/// At the expected hourly cadence a 24-sample window covers one day.
const WINDOW_6H: usize = 6;
const WINDOW_24H: usize = 24;
const WINDOW_WEEK: usize = 168;

/// Stateless feature pipeline.
///
/// Derives one [`FeatureVector`] per reading: calendar fields, cyclical
/// encodings, causal rolling statistics (minimum window size 1), lag
/// values backfilled with the current value, and deviation metrics that
/// resolve to 0 instead of NaN when undefined.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEngineer;

impl FeatureEngineer {
    /// Engineer features for one building's readings.
    ///
    /// Input is stably sorted by timestamp before windowed statistics
    /// are computed; output order matches the sorted order.
    pub fn engineer(readings: &[Reading]) -> Vec<FeatureVector> {
        let mut sorted: Vec<&Reading> = readings.iter().collect();
        sorted.sort_by_key(|r| r.timestamp);

        let values: Vec<f64> = sorted.iter().map(|r| r.meter_reading).collect();
        let has_temperature = sorted.iter().any(|r| r.air_temperature.is_some());
        let temps: Vec<f64> = sorted
            .iter()
            .map(|r| r.air_temperature.unwrap_or(0.0))
            .collect();

        sorted
            .iter()
            .enumerate()
            .map(|(i, reading)| {
                let window_24 = causal_window(&values, i, WINDOW_24H);
                let ma_6h = mean(causal_window(&values, i, WINDOW_6H));
                let ma_24h = mean(window_24);
                let std_24h = sample_std(window_24);
                let max_24h = window_24.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                let min_24h = window_24.iter().cloned().fold(f64::INFINITY, f64::min);

                let lag_1h = if i >= 1 { values[i - 1] } else { values[i] };
                let lag_24h = if i >= WINDOW_24H {
                    values[i - WINDOW_24H]
                } else {
                    values[i]
                };

                let deviation = values[i] - ma_24h;
                let deviation_pct = if ma_24h != 0.0 {
                    deviation / ma_24h * 100.0
                } else {
                    0.0
                };
                let zscore = if std_24h > 0.0 { deviation / std_24h } else { 0.0 };

                let hour = reading.timestamp.hour();
                let day_of_week = reading.timestamp.weekday().num_days_from_monday();
                let is_weekend = day_of_week >= 5;
                let is_business_hours = (8..=18).contains(&hour) && day_of_week < 5;

                let temp_deviation = if has_temperature {
                    let weekly_mean = mean(causal_window(&temps, i, WINDOW_WEEK));
                    Some((temps[i] - weekly_mean).abs())
                } else {
                    None
                };

                FeatureVector {
                    timestamp: reading.timestamp,
                    building_id: reading.building_id,
                    meter_reading: values[i],
                    hour,
                    day_of_week,
                    month: reading.timestamp.month(),
                    is_weekend,
                    is_business_hours,
                    hour_sin: (2.0 * PI * hour as f64 / 24.0).sin(),
                    hour_cos: (2.0 * PI * hour as f64 / 24.0).cos(),
                    day_sin: (2.0 * PI * day_of_week as f64 / 7.0).sin(),
                    day_cos: (2.0 * PI * day_of_week as f64 / 7.0).cos(),
                    energy_ma_6h: ma_6h,
                    energy_ma_24h: ma_24h,
                    energy_std_24h: std_24h,
                    energy_max_24h: max_24h,
                    energy_min_24h: min_24h,
                    energy_lag_1h: lag_1h,
                    energy_lag_24h: lag_24h,
                    energy_deviation_from_ma: deviation,
                    energy_deviation_pct: deviation_pct,
                    energy_zscore: zscore,
                    air_temperature: reading.air_temperature,
                    temp_deviation,
                    wind_speed: reading.wind_speed,
                    cloud_coverage: reading.cloud_coverage,
                }
            })
            .collect()
    }

    /// Validate raw records, then engineer features.
    ///
    /// Fails with [`crate::FeatureError::MissingField`] when a record
    /// lacks a timestamp or a usable meter reading.
    pub fn engineer_raw(raw: &[RawReading]) -> Result<Vec<FeatureVector>> {
        let readings: Vec<Reading> = raw
            .iter()
            .cloned()
            .map(Reading::try_from)
            .collect::<Result<_>>()?;
        Ok(Self::engineer(&readings))
    }

    /// Model column names for a reading sequence: the fixed base set
    /// plus each weather family carried by at least one reading.
    pub fn feature_names(readings: &[Reading]) -> Vec<String> {
        let mut names: Vec<String> = BASE_FEATURES.iter().map(|s| s.to_string()).collect();
        if readings.iter().any(|r| r.air_temperature.is_some()) {
            names.push("air_temperature".to_string());
            names.push("temp_deviation".to_string());
        }
        if readings.iter().any(|r| r.wind_speed.is_some()) {
            names.push("wind_speed".to_string());
        }
        if readings.iter().any(|r| r.cloud_coverage.is_some()) {
            names.push("cloud_coverage".to_string());
        }
        names
    }
}

/// Causal window ending at index `i` (inclusive), at most `size` samples.
fn causal_window(values: &[f64], i: usize, size: usize) -> &[f64] {
    let start = (i + 1).saturating_sub(size);
    &values[start..=i]
}

fn mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

/// Sample standard deviation; 0 for windows shorter than 2.
fn sample_std(window: &[f64]) -> f64 {
    let n = window.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(window);
    let var = window.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    var.sqrt()
}
