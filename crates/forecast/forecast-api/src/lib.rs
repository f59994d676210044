//! Forecasting API
//!
//! Configuration types for the seasonal regression forecaster.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use forecast_spi::{
    ForecastError, ForecastPoint, ForecastReport, ForecastSummary, Forecaster, Frequency,
    ModelInfo, Result, TrainingMetrics, Trend,
};

/// How seasonal components combine with the base level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalityMode {
    Additive,
    /// Fit in log space; seasonal effects scale with the level.
    Multiplicative,
}

/// Seasonal forecaster configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecasterConfig {
    pub seasonality_mode: SeasonalityMode,
    /// Prediction interval width, in (0, 1).
    pub interval_width: f64,
    /// Fourier order of the unconditional daily component.
    pub daily_fourier_order: usize,
    /// Fourier order of the weekly component.
    pub weekly_fourier_order: usize,
    /// Fourier order of the daily component applied on business days only.
    pub business_day_fourier_order: usize,
    /// Fourier order of the daily component applied on weekends only.
    pub weekend_fourier_order: usize,
    /// Ridge regularization strength for the normal equations.
    pub ridge_lambda: f64,
    /// Holdout length (in samples) for backtest evaluation.
    pub holdout_horizon: usize,
}

impl Default for ForecasterConfig {
    fn default() -> Self {
        Self {
            seasonality_mode: SeasonalityMode::Multiplicative,
            interval_width: 0.95,
            daily_fourier_order: 4,
            weekly_fourier_order: 3,
            business_day_fourier_order: 8,
            weekend_fourier_order: 5,
            ridge_lambda: 1e-3,
            holdout_horizon: 24,
        }
    }
}

impl ForecasterConfig {
    pub fn additive() -> Self {
        Self {
            seasonality_mode: SeasonalityMode::Additive,
            ..Default::default()
        }
    }

    pub fn with_interval_width(mut self, interval_width: f64) -> Self {
        self.interval_width = interval_width;
        self
    }

    pub fn with_ridge_lambda(mut self, ridge_lambda: f64) -> Self {
        self.ridge_lambda = ridge_lambda;
        self
    }

    /// Validate all parameters, failing with `InvalidParameter`.
    pub fn validate(&self) -> Result<()> {
        if !(self.interval_width > 0.0 && self.interval_width < 1.0) {
            return Err(ForecastError::InvalidParameter {
                name: "interval_width".to_string(),
                reason: format!("must be in (0, 1), got {}", self.interval_width),
            });
        }
        if self.daily_fourier_order == 0 || self.weekly_fourier_order == 0 {
            return Err(ForecastError::InvalidParameter {
                name: "fourier_order".to_string(),
                reason: "daily and weekly orders must be positive".to_string(),
            });
        }
        if self.ridge_lambda < 0.0 {
            return Err(ForecastError::InvalidParameter {
                name: "ridge_lambda".to_string(),
                reason: "must be non-negative".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ForecasterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_mode_is_multiplicative() {
        assert_eq!(
            ForecasterConfig::default().seasonality_mode,
            SeasonalityMode::Multiplicative
        );
    }

    #[test]
    fn test_invalid_interval_width_rejected() {
        let config = ForecasterConfig::default().with_interval_width(1.5);
        assert!(matches!(
            config.validate(),
            Err(ForecastError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_zero_fourier_order_rejected() {
        let config = ForecasterConfig {
            daily_fourier_order: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
