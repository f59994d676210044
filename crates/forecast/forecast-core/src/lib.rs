//! Forecasting Core
//!
//! Seasonal regression forecaster with daily/weekly Fourier components,
//! conditional business-day seasonalities and external regressors,
//! plus persistable fitted models and a single-flight registry.

mod artifact;
mod design;
mod forecaster;
mod linalg;
mod prepare;
mod registry;

pub use artifact::ForecasterArtifact;
pub use design::DesignSpec;
pub use forecaster::{EnergyForecaster, FittedForecaster};
pub use prepare::{prepare, PreparedSeries};
pub use registry::ForecasterRegistry;
