//! Series preparation: filtering, deduplication, gap filling.

use chrono::{DateTime, Utc};
use features::{BuildingId, Reading};

/// A cleaned target series for one building, ready for design-matrix
/// assembly: deduplicated by timestamp, sorted ascending, with
/// non-finite targets median-filled and the temperature regressor
/// forward/backward filled when present.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSeries {
    pub building_id: BuildingId,
    pub timestamps: Vec<DateTime<Utc>>,
    pub values: Vec<f64>,
    pub temperature: Option<Vec<f64>>,
}

impl PreparedSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn span_days(&self) -> i64 {
        match (self.timestamps.first(), self.timestamps.last()) {
            (Some(first), Some(last)) => (*last - *first).num_days(),
            _ => 0,
        }
    }

    pub fn mean(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.len() as f64
    }

    pub fn std(&self) -> f64 {
        let n = self.len();
        if n < 2 {
            return 0.0;
        }
        let m = self.mean();
        (self.values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt()
    }

    /// Split into (head, tail) with `tail_len` trailing points.
    pub fn split_tail(&self, tail_len: usize) -> (PreparedSeries, PreparedSeries) {
        let cut = self.len().saturating_sub(tail_len);
        let head = PreparedSeries {
            building_id: self.building_id,
            timestamps: self.timestamps[..cut].to_vec(),
            values: self.values[..cut].to_vec(),
            temperature: self.temperature.as_ref().map(|t| t[..cut].to_vec()),
        };
        let tail = PreparedSeries {
            building_id: self.building_id,
            timestamps: self.timestamps[cut..].to_vec(),
            values: self.values[cut..].to_vec(),
            temperature: self.temperature.as_ref().map(|t| t[cut..].to_vec()),
        };
        (head, tail)
    }
}

/// Prepare one building's readings for fitting.
pub fn prepare(readings: &[Reading], building_id: BuildingId) -> PreparedSeries {
    let mut filtered: Vec<&Reading> = readings
        .iter()
        .filter(|r| r.building_id == building_id)
        .collect();
    filtered.sort_by_key(|r| r.timestamp);
    // Keep the first record for each timestamp.
    filtered.dedup_by_key(|r| r.timestamp);

    let timestamps: Vec<DateTime<Utc>> = filtered.iter().map(|r| r.timestamp).collect();
    let mut values: Vec<f64> = filtered.iter().map(|r| r.meter_reading).collect();
    fill_with_median(&mut values);

    let temperature = if filtered.iter().any(|r| r.air_temperature.is_some()) {
        Some(fill_forward_backward(
            filtered.iter().map(|r| r.air_temperature).collect(),
        ))
    } else {
        None
    };

    PreparedSeries {
        building_id,
        timestamps,
        values,
        temperature,
    }
}

/// Replace non-finite entries with the median of the finite ones.
fn fill_with_median(values: &mut [f64]) {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.len() == values.len() {
        return;
    }
    let median = if finite.is_empty() {
        0.0
    } else {
        finite.sort_by(|a, b| a.total_cmp(b));
        let mid = finite.len() / 2;
        if finite.len() % 2 == 0 {
            (finite[mid - 1] + finite[mid]) / 2.0
        } else {
            finite[mid]
        }
    };
    for v in values.iter_mut() {
        if !v.is_finite() {
            *v = median;
        }
    }
}

/// Forward fill, then backward fill for any leading gap.
fn fill_forward_backward(values: Vec<Option<f64>>) -> Vec<f64> {
    let mut filled: Vec<Option<f64>> = values;
    let mut last = None;
    for v in filled.iter_mut() {
        match v {
            Some(x) => last = Some(*x),
            None => *v = last,
        }
    }
    let mut next = None;
    for v in filled.iter_mut().rev() {
        match v {
            Some(x) => next = Some(*x),
            None => *v = next,
        }
    }
    filled.into_iter().map(|v| v.unwrap_or(0.0)).collect()
}
