//! Contract definitions for forecasting.

mod forecaster;

pub use forecaster::Forecaster;
