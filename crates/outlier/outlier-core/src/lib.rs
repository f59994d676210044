//! Outlier Detection Core
//!
//! Isolation-forest detector over engineered meter-reading features,
//! with persistable fitted models and a single-flight registry.

mod artifact;
mod classify;
mod detector;
mod forest;
mod registry;
mod scaler;

pub use artifact::DetectorArtifact;
pub use classify::classify_anomaly_type;
pub use detector::{EnergyOutlierDetector, FittedDetector};
pub use forest::IsolationForest;
pub use registry::DetectorRegistry;
pub use scaler::StandardScaler;
