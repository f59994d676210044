//! Seasonal design matrix: Fourier terms, conditional seasonalities,
//! temperature and calendar regressors.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

use std::f64::consts::TAU;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Standardization parameters for the temperature regressor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemperatureSpec {
    pub mean: f64,
    pub std: f64,
}

/// Fixed description of the regression basis. Persisted with the model
/// so forecast rows are built exactly like training rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignSpec {
    /// Origin for the scaled trend term.
    pub t0: DateTime<Utc>,
    /// Training span in seconds, used to scale the trend into [0, 1].
    pub span_seconds: f64,
    pub daily_order: usize,
    pub weekly_order: usize,
    pub business_order: usize,
    pub weekend_order: usize,
    pub temperature: Option<TemperatureSpec>,
}

impl DesignSpec {
    /// Number of columns a row of this basis produces.
    pub fn width(&self) -> usize {
        let mut w = 2; // intercept + trend
        w += 2 * (self.daily_order + self.weekly_order);
        w += 2 * (self.business_order + self.weekend_order);
        if self.temperature.is_some() {
            w += 1;
        }
        w + 1 // weekend indicator
    }

    /// Build one design row for a timestamp. `temperature` must be
    /// provided iff the spec carries a temperature regressor.
    pub fn row(&self, ts: DateTime<Utc>, temperature: Option<f64>) -> Vec<f64> {
        let mut row = Vec::with_capacity(self.width());
        row.push(1.0);

        let elapsed = (ts - self.t0).num_seconds() as f64;
        let scale = if self.span_seconds > 0.0 {
            self.span_seconds
        } else {
            1.0
        };
        row.push(elapsed / scale);

        let day_frac = seconds_of_day(ts) / SECONDS_PER_DAY;
        let week_frac = (ts.weekday().num_days_from_monday() as f64 + day_frac) / 7.0;
        push_fourier(&mut row, day_frac, self.daily_order);
        push_fourier(&mut row, week_frac, self.weekly_order);

        let weekend = ts.weekday().num_days_from_monday() >= 5;
        let business = if weekend { 0.0 } else { 1.0 };
        push_fourier_scaled(&mut row, day_frac, self.business_order, business);
        push_fourier_scaled(&mut row, day_frac, self.weekend_order, 1.0 - business);

        if let Some(spec) = &self.temperature {
            let t = temperature.unwrap_or(spec.mean);
            let std = if spec.std > 0.0 { spec.std } else { 1.0 };
            row.push((t - spec.mean) / std);
        }

        row.push(if weekend { 1.0 } else { 0.0 });
        row
    }

    /// Synthetic temperature for forecast horizons past the observed
    /// data: annual cycle peaking in summer plus a diurnal cycle
    /// peaking mid-afternoon, centered on the training mean.
    pub fn synth_temperature(&self, ts: DateTime<Utc>) -> Option<f64> {
        let spec = self.temperature.as_ref()?;
        let doy = ts.ordinal() as f64;
        let hour = ts.hour() as f64;
        let annual = 20.0 * (TAU * (doy - 80.0) / 365.0).sin();
        let diurnal = 5.0 * (TAU * (hour - 6.0) / 24.0).sin();
        Some(spec.mean + annual + diurnal)
    }

    pub fn seasonal_components(&self) -> Vec<String> {
        vec![
            "daily".to_string(),
            "weekly".to_string(),
            "business_hours".to_string(),
            "weekend".to_string(),
        ]
    }

    pub fn regressors(&self) -> Vec<String> {
        let mut r = Vec::new();
        if self.temperature.is_some() {
            r.push("temperature".to_string());
        }
        r.push("is_weekend".to_string());
        r
    }
}

fn seconds_of_day(ts: DateTime<Utc>) -> f64 {
    (ts.hour() * 3600 + ts.minute() * 60 + ts.second()) as f64
}

fn push_fourier(row: &mut Vec<f64>, frac: f64, order: usize) {
    push_fourier_scaled(row, frac, order, 1.0);
}

fn push_fourier_scaled(row: &mut Vec<f64>, frac: f64, order: usize, gate: f64) {
    for k in 1..=order {
        let angle = TAU * k as f64 * frac;
        row.push(gate * angle.sin());
        row.push(gate * angle.cos());
    }
}
