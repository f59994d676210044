//! Feature Engineering Pipeline
//!
//! Derives deterministic per-reading feature vectors from time-ordered
//! meter-reading sequences. Shared by the outlier detection and
//! forecasting engines.

mod engineer;
mod error;
mod reading;
mod vector;

pub use engineer::FeatureEngineer;
pub use error::{FeatureError, Result};
pub use reading::{BuildingId, RawReading, Reading};
pub use vector::{FeatureVector, BASE_FEATURES};
