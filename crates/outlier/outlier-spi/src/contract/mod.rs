//! Contract definitions for outlier detection.

mod detector;

pub use detector::Detector;
