//! Error definitions for outlier detection.

mod outlier_error;

pub use outlier_error::{OutlierError, Result};
