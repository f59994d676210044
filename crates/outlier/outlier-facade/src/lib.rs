//! Outlier Detection Facade
//!
//! Unified re-exports for the outlier detection module:
//! - `Detector` trait, report and anomaly models, errors from SPI
//! - `DetectorConfig` from API
//! - `EnergyOutlierDetector`, artifact and registry from Core

// Re-export everything from SPI
pub use outlier_spi::*;

// Re-export everything from API
pub use outlier_api::*;

// Re-export everything from Core
pub use outlier_core::*;
