//! Seasonal regression forecaster with prediction intervals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use features::{BuildingId, Reading};
use forecast_api::{ForecasterConfig, SeasonalityMode};
use forecast_spi::{
    ForecastError, ForecastPoint, ForecastReport, ForecastSummary, Forecaster, Frequency,
    ModelInfo, Result, TrainingMetrics, Trend,
};

use crate::design::{DesignSpec, TemperatureSpec};
use crate::linalg::{predict_row, ridge_solve};
use crate::prepare::{prepare, PreparedSeries};

/// Minimum prepared points required to fit.
pub const MIN_TRAINING_SAMPLES: usize = 100;

/// An immutable fitted seasonal model for one building.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FittedForecaster {
    building_id: BuildingId,
    mode: SeasonalityMode,
    interval_width: f64,
    design: DesignSpec,
    coefficients: Vec<f64>,
    /// Residual standard deviation in fit space.
    residual_std: f64,
    last_timestamp: DateTime<Utc>,
    metrics: TrainingMetrics,
}

impl FittedForecaster {
    /// Fit a seasonal model on one building's readings.
    pub fn train(
        config: &ForecasterConfig,
        readings: &[Reading],
        building_id: BuildingId,
    ) -> Result<Self> {
        config.validate()?;
        let series = prepare(readings, building_id);
        if series.len() < MIN_TRAINING_SAMPLES {
            return Err(ForecastError::InsufficientData {
                required: MIN_TRAINING_SAMPLES,
                actual: series.len(),
            });
        }

        let metrics = evaluate_holdout(config, &series).unwrap_or_else(|| {
            TrainingMetrics::Descriptive {
                training_samples: series.len(),
                data_range_days: series.span_days(),
                avg_energy_usage: series.mean(),
                energy_std: series.std(),
            }
        });

        let fit = fit_series(config, &series)?;
        info!(
            building_id,
            samples = series.len(),
            residual_std = fit.residual_std,
            "fitted seasonal forecaster"
        );
        Ok(FittedForecaster {
            building_id,
            mode: config.seasonality_mode,
            interval_width: config.interval_width,
            design: fit.design,
            coefficients: fit.coefficients,
            residual_std: fit.residual_std,
            last_timestamp: fit.last_timestamp,
            metrics,
        })
    }

    pub fn building_id(&self) -> BuildingId {
        self.building_id
    }

    pub fn metrics(&self) -> &TrainingMetrics {
        &self.metrics
    }

    pub fn last_timestamp(&self) -> DateTime<Utc> {
        self.last_timestamp
    }

    /// Project `periods` future values past the training data.
    pub fn forecast(&self, periods: usize, frequency: Frequency) -> Result<ForecastReport> {
        if periods == 0 {
            return Err(ForecastError::InvalidParameter {
                name: "periods".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let z = z_score(self.interval_width);
        let mut forecast = Vec::with_capacity(periods);
        for i in 0..periods {
            let ts = self.last_timestamp + frequency.step() * (i as i32 + 1);
            let temp = self.design.synth_temperature(ts);
            let row = self.design.row(ts, temp);
            let fit_value = predict_row(&row, &self.coefficients);
            // Uncertainty widens with the horizon.
            let se = self.residual_std * ((i + 1) as f64).sqrt();
            let (predicted, lower, upper) = self.invert(fit_value, z * se);
            forecast.push(ForecastPoint {
                timestamp: ts,
                predicted_value: predicted,
                lower_bound: lower,
                upper_bound: upper,
                confidence_level: self.interval_width,
            });
        }

        debug!(
            building_id = self.building_id,
            periods,
            "generated forecast"
        );
        Ok(ForecastReport {
            summary: summarize(&forecast),
            model_info: ModelInfo {
                seasonal_components: self.design.seasonal_components(),
                regressors: self.design.regressors(),
                training_metrics: self.metrics.clone(),
            },
            forecast,
        })
    }

    /// Map a fit-space prediction and half-width back to the original
    /// scale, clamped at zero.
    fn invert(&self, fit_value: f64, half_width: f64) -> (f64, f64, f64) {
        let (p, lo, hi) = match self.mode {
            SeasonalityMode::Additive => {
                (fit_value, fit_value - half_width, fit_value + half_width)
            }
            SeasonalityMode::Multiplicative => (
                fit_value.exp_m1(),
                (fit_value - half_width).exp_m1(),
                (fit_value + half_width).exp_m1(),
            ),
        };
        (p.max(0.0), lo.max(0.0), hi.max(0.0))
    }
}

struct SeriesFit {
    design: DesignSpec,
    coefficients: Vec<f64>,
    residual_std: f64,
    last_timestamp: DateTime<Utc>,
}

fn fit_series(config: &ForecasterConfig, series: &PreparedSeries) -> Result<SeriesFit> {
    let first = series.timestamps[0];
    let last = series.timestamps[series.len() - 1];

    let temperature = series.temperature.as_ref().map(|temps| {
        let mean = temps.iter().sum::<f64>() / temps.len() as f64;
        let var = temps.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / temps.len() as f64;
        TemperatureSpec {
            mean,
            std: var.sqrt(),
        }
    });
    let design = DesignSpec {
        t0: first,
        span_seconds: (last - first).num_seconds() as f64,
        daily_order: config.daily_fourier_order,
        weekly_order: config.weekly_fourier_order,
        business_order: config.business_day_fourier_order,
        weekend_order: config.weekend_fourier_order,
        temperature,
    };

    let targets: Vec<f64> = match config.seasonality_mode {
        SeasonalityMode::Additive => series.values.clone(),
        // Log transform; targets are clamped at zero upstream.
        SeasonalityMode::Multiplicative => series.values.iter().map(|v| v.max(0.0).ln_1p()).collect(),
    };
    let rows: Vec<Vec<f64>> = series
        .timestamps
        .iter()
        .enumerate()
        .map(|(i, ts)| {
            let temp = series.temperature.as_ref().map(|t| t[i]);
            design.row(*ts, temp)
        })
        .collect();

    let coefficients = ridge_solve(&rows, &targets, config.ridge_lambda)?;
    let n = targets.len();
    let sse: f64 = rows
        .iter()
        .zip(&targets)
        .map(|(row, &y)| (y - predict_row(row, &coefficients)).powi(2))
        .sum();
    let dof = n.saturating_sub(coefficients.len()).max(1);
    let residual_std = (sse / dof as f64).sqrt();

    Ok(SeriesFit {
        design,
        coefficients,
        residual_std,
        last_timestamp: last,
    })
}

/// Backtest on the trailing horizon when the series is long enough to
/// spare it: at least a week of data and 100 points left after the cut.
fn evaluate_holdout(config: &ForecasterConfig, series: &PreparedSeries) -> Option<TrainingMetrics> {
    let horizon = config.holdout_horizon;
    if series.span_days() < 7 || series.len().saturating_sub(horizon) < MIN_TRAINING_SAMPLES {
        return None;
    }
    let (head, tail) = series.split_tail(horizon);
    let fit = fit_series(config, &head).ok()?;

    let z = z_score(config.interval_width);
    let mut abs_err = 0.0;
    let mut sq_err = 0.0;
    let mut pct_err = 0.0;
    let mut pct_count = 0usize;
    let mut covered = 0usize;
    for (i, (&actual, ts)) in tail.values.iter().zip(&tail.timestamps).enumerate() {
        let temp = tail.temperature.as_ref().map(|t| t[i]);
        let row = fit.design.row(*ts, temp);
        let fit_value = predict_row(&row, &fit.coefficients);
        let se = fit.residual_std * ((i + 1) as f64).sqrt();
        let (predicted, lower, upper) = match config.seasonality_mode {
            SeasonalityMode::Additive => {
                (fit_value, fit_value - z * se, fit_value + z * se)
            }
            SeasonalityMode::Multiplicative => (
                fit_value.exp_m1().max(0.0),
                (fit_value - z * se).exp_m1().max(0.0),
                (fit_value + z * se).exp_m1().max(0.0),
            ),
        };
        let err = (actual - predicted).abs();
        abs_err += err;
        sq_err += err * err;
        if actual != 0.0 {
            pct_err += err / actual.abs();
            pct_count += 1;
        }
        if actual >= lower && actual <= upper {
            covered += 1;
        }
    }
    let n = tail.len() as f64;
    Some(TrainingMetrics::Holdout {
        mape: if pct_count > 0 {
            pct_err / pct_count as f64
        } else {
            0.0
        },
        mae: abs_err / n,
        rmse: (sq_err / n).sqrt(),
        coverage: covered as f64 / n,
        training_samples: series.len(),
    })
}

fn summarize(forecast: &[ForecastPoint]) -> ForecastSummary {
    let predicted: Vec<f64> = forecast.iter().map(|p| p.predicted_value).collect();
    let total: f64 = predicted.iter().sum();
    let n = forecast.len() as f64;
    let width: f64 = forecast
        .iter()
        .map(|p| p.upper_bound - p.lower_bound)
        .sum::<f64>()
        / n;
    let peak = forecast
        .iter()
        .max_by(|a, b| a.predicted_value.total_cmp(&b.predicted_value));
    let trough = forecast
        .iter()
        .min_by(|a, b| a.predicted_value.total_cmp(&b.predicted_value));
    // forecast is non-empty; periods == 0 is rejected earlier.
    let fallback = forecast[0].timestamp;
    ForecastSummary {
        total_predicted: total,
        average_predicted: total / n,
        confidence_interval_width: width,
        trend: Trend::from_series(&predicted),
        peak_period: peak.map(|p| p.timestamp).unwrap_or(fallback),
        trough_period: trough.map(|p| p.timestamp).unwrap_or(fallback),
    }
}

/// Two-sided normal quantile for the common confidence levels.
fn z_score(confidence: f64) -> f64 {
    if confidence >= 0.99 {
        2.576
    } else if confidence >= 0.95 {
        1.96
    } else if confidence >= 0.90 {
        1.645
    } else if confidence >= 0.80 {
        1.282
    } else {
        1.96
    }
}

/// Mutable fit/forecast wrapper around an optional [`FittedForecaster`].
#[derive(Debug, Default)]
pub struct EnergyForecaster {
    config: ForecasterConfig,
    fitted: Option<FittedForecaster>,
}

impl EnergyForecaster {
    pub fn new(config: ForecasterConfig) -> Self {
        EnergyForecaster {
            config,
            fitted: None,
        }
    }

    pub fn fitted(&self) -> Option<&FittedForecaster> {
        self.fitted.as_ref()
    }

    /// Install a previously fitted model, replacing any current one.
    pub fn restore(&mut self, model: FittedForecaster) {
        self.fitted = Some(model);
    }
}

impl Forecaster for EnergyForecaster {
    fn fit(&mut self, readings: &[Reading], building_id: BuildingId) -> Result<TrainingMetrics> {
        let fitted = FittedForecaster::train(&self.config, readings, building_id)?;
        let metrics = fitted.metrics.clone();
        self.fitted = Some(fitted);
        Ok(metrics)
    }

    fn forecast(&self, periods: usize, frequency: Frequency) -> Result<ForecastReport> {
        let fitted = self.fitted.as_ref().ok_or(ForecastError::NotFitted)?;
        fitted.forecast(periods, frequency)
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Timelike};
    use std::f64::consts::TAU;

    fn seasonal_readings(hours: usize) -> Vec<Reading> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..hours)
            .map(|i| {
                let ts = start + Duration::hours(i as i64);
                let value = 100.0 + 30.0 * (TAU * (i % 24) as f64 / 24.0).sin();
                Reading::new(ts, 1, value)
            })
            .collect()
    }

    #[test]
    fn test_fit_requires_minimum_samples() {
        let readings = seasonal_readings(50);
        let err = FittedForecaster::train(&ForecasterConfig::default(), &readings, 1).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::InsufficientData {
                required: 100,
                actual: 50
            }
        ));
    }

    #[test]
    fn test_forecast_before_fit_fails() {
        let forecaster = EnergyForecaster::default();
        let err = forecaster.forecast(24, Frequency::Hourly).unwrap_err();
        assert!(matches!(err, ForecastError::NotFitted));
    }

    #[test]
    fn test_zero_periods_rejected() {
        let readings = seasonal_readings(240);
        let mut forecaster = EnergyForecaster::default();
        forecaster.fit(&readings, 1).unwrap();
        let err = forecaster.forecast(0, Frequency::Hourly).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::InvalidParameter { ref name, .. } if name == "periods"
        ));
    }

    #[test]
    fn test_forecast_continues_from_last_timestamp() {
        let readings = seasonal_readings(240);
        let mut forecaster = EnergyForecaster::default();
        forecaster.fit(&readings, 1).unwrap();
        let report = forecaster.forecast(24, Frequency::Hourly).unwrap();
        assert_eq!(report.forecast.len(), 24);
        let last_obs = readings.last().unwrap().timestamp;
        assert_eq!(report.forecast[0].timestamp, last_obs + Duration::hours(1));
        for pair in report.forecast.windows(2) {
            assert!(pair[1].timestamp > pair[0].timestamp);
        }
    }

    #[test]
    fn test_bounds_bracket_prediction_and_are_nonnegative() {
        let readings = seasonal_readings(240);
        let mut forecaster = EnergyForecaster::default();
        forecaster.fit(&readings, 1).unwrap();
        let report = forecaster.forecast(48, Frequency::Hourly).unwrap();
        for point in &report.forecast {
            assert!(point.lower_bound <= point.predicted_value);
            assert!(point.predicted_value <= point.upper_bound);
            assert!(point.lower_bound >= 0.0);
            assert_eq!(point.confidence_level, 0.95);
        }
    }

    #[test]
    fn test_daily_pattern_survives_into_forecast() {
        let readings = seasonal_readings(24 * 14);
        let mut forecaster = EnergyForecaster::default();
        forecaster.fit(&readings, 1).unwrap();
        let report = forecaster.forecast(24, Frequency::Hourly).unwrap();
        // The sine peaks at hour 6 and troughs at hour 18 of each day.
        let at = |h: u32| {
            report
                .forecast
                .iter()
                .find(|p| p.timestamp.hour() == h)
                .unwrap()
                .predicted_value
        };
        assert!(at(6) > at(18));
    }

    #[test]
    fn test_additive_mode_fits_flat_series_closely() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let readings: Vec<Reading> = (0..240)
            .map(|i| Reading::new(start + Duration::hours(i), 1, 500.0))
            .collect();
        let mut forecaster = EnergyForecaster::new(ForecasterConfig::additive());
        forecaster.fit(&readings, 1).unwrap();
        let report = forecaster.forecast(12, Frequency::Hourly).unwrap();
        for point in &report.forecast {
            assert!((point.predicted_value - 500.0).abs() < 5.0);
        }
        assert_eq!(report.summary.trend, Trend::Stable);
    }

    #[test]
    fn test_holdout_metrics_when_span_allows() {
        let readings = seasonal_readings(24 * 10);
        let mut forecaster = EnergyForecaster::default();
        let metrics = forecaster.fit(&readings, 1).unwrap();
        match metrics {
            TrainingMetrics::Holdout {
                mape,
                coverage,
                training_samples,
                ..
            } => {
                assert_eq!(training_samples, 240);
                assert!(mape < 0.5);
                assert!((0.0..=1.0).contains(&coverage));
            }
            other => panic!("expected holdout metrics, got {other:?}"),
        }
    }

    #[test]
    fn test_descriptive_metrics_on_short_span() {
        // 120 points over 5 days: enough to fit, too short to backtest.
        let readings = seasonal_readings(120);
        let mut forecaster = EnergyForecaster::default();
        let metrics = forecaster.fit(&readings, 1).unwrap();
        match metrics {
            TrainingMetrics::Descriptive {
                training_samples,
                data_range_days,
                ..
            } => {
                assert_eq!(training_samples, 120);
                assert_eq!(data_range_days, 4);
            }
            other => panic!("expected descriptive metrics, got {other:?}"),
        }
    }

    #[test]
    fn test_summary_peak_and_trough() {
        let readings = seasonal_readings(240);
        let mut forecaster = EnergyForecaster::default();
        forecaster.fit(&readings, 1).unwrap();
        let report = forecaster.forecast(24, Frequency::Hourly).unwrap();
        let peak = report
            .forecast
            .iter()
            .max_by(|a, b| a.predicted_value.total_cmp(&b.predicted_value))
            .unwrap();
        assert_eq!(report.summary.peak_period, peak.timestamp);
        assert!(report.summary.total_predicted > 0.0);
        assert!(report.summary.confidence_interval_width > 0.0);
    }

    #[test]
    fn test_model_info_components() {
        let readings = seasonal_readings(240);
        let mut forecaster = EnergyForecaster::default();
        forecaster.fit(&readings, 1).unwrap();
        let report = forecaster.forecast(1, Frequency::Hourly).unwrap();
        assert_eq!(
            report.model_info.seasonal_components,
            vec!["daily", "weekly", "business_hours", "weekend"]
        );
        assert_eq!(report.model_info.regressors, vec!["is_weekend"]);
    }

    #[test]
    fn test_temperature_regressor_included_when_present() {
        let readings: Vec<Reading> = seasonal_readings(240)
            .into_iter()
            .map(|r| {
                let t = r.timestamp;
                r.with_temperature(15.0 + 5.0 * (TAU * t.hour() as f64 / 24.0).sin())
            })
            .collect();
        let mut forecaster = EnergyForecaster::default();
        forecaster.fit(&readings, 1).unwrap();
        let report = forecaster.forecast(1, Frequency::Hourly).unwrap();
        assert_eq!(
            report.model_info.regressors,
            vec!["temperature", "is_weekend"]
        );
    }

    #[test]
    fn test_daily_frequency_steps_by_days() {
        let readings = seasonal_readings(240);
        let mut forecaster = EnergyForecaster::default();
        forecaster.fit(&readings, 1).unwrap();
        let report = forecaster.forecast(7, Frequency::Daily).unwrap();
        assert_eq!(report.forecast.len(), 7);
        let step = report.forecast[1].timestamp - report.forecast[0].timestamp;
        assert_eq!(step, Duration::days(1));
    }

    #[test]
    fn test_refit_replaces_model() {
        let readings = seasonal_readings(240);
        let mut forecaster = EnergyForecaster::default();
        forecaster.fit(&readings, 1).unwrap();
        let longer = seasonal_readings(480);
        forecaster.fit(&longer, 1).unwrap();
        let report = forecaster.forecast(1, Frequency::Hourly).unwrap();
        assert_eq!(
            report.forecast[0].timestamp,
            longer.last().unwrap().timestamp + Duration::hours(1)
        );
    }

    #[test]
    fn test_z_score_levels() {
        assert_eq!(z_score(0.99), 2.576);
        assert_eq!(z_score(0.95), 1.96);
        assert_eq!(z_score(0.90), 1.645);
        assert_eq!(z_score(0.80), 1.282);
        assert_eq!(z_score(0.50), 1.96);
    }
}
