//! Rule-based anomaly classification.

use features::FeatureVector;
use outlier_spi::AnomalyType;

/// Classify a flagged point with an ordered rule cascade; the first
/// matching rule wins.
pub fn classify_anomaly_type(fv: &FeatureVector) -> AnomalyType {
    let hour = fv.hour;
    let deviation_pct = fv.energy_deviation_pct;

    // High usage during off-hours
    if !fv.is_business_hours && deviation_pct > 50.0 {
        return AnomalyType::OffHoursSpike;
    }
    // Weekend usage anomaly
    if fv.is_weekend && deviation_pct > 30.0 {
        return AnomalyType::WeekendAnomaly;
    }
    // Peak hour extreme usage
    if (14..=16).contains(&hour) && deviation_pct > 100.0 {
        return AnomalyType::PeakHourExtreme;
    }
    // Night time usage
    if (hour >= 22 || hour <= 6) && deviation_pct > 50.0 {
        return AnomalyType::NightUsageSpike;
    }
    // General usage spike
    if deviation_pct > 50.0 {
        return AnomalyType::UsageSpike;
    }
    // Low usage anomaly
    if deviation_pct < -50.0 {
        return AnomalyType::LowUsageAnomaly;
    }

    AnomalyType::GeneralAnomaly
}
