//! Data models for forecasting.

mod forecast_point;
mod frequency;
mod metrics;
mod report;

pub use forecast_point::ForecastPoint;
pub use frequency::Frequency;
pub use metrics::TrainingMetrics;
pub use report::{ForecastReport, ForecastSummary, ModelInfo, Trend};
