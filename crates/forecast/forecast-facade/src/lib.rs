//! Forecasting Facade
//!
//! Unified re-exports for the seasonal forecasting module:
//! - `Forecaster` trait, report and metric models, errors from SPI
//! - `ForecasterConfig` and `SeasonalityMode` from API
//! - `EnergyForecaster`, artifact and registry from Core

// Re-export everything from SPI
pub use forecast_spi::*;

// Re-export everything from API
pub use forecast_api::*;

// Re-export everything from Core
pub use forecast_core::*;
