//! Basic example demonstrating energy outlier detection
//!
//! Run with: cargo run --example basic -p outlier-facade

use chrono::{Duration, TimeZone, Utc};
use features::Reading;
use outlier_facade::{Detector, DetectorConfig, EnergyOutlierDetector};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Energy Outlier Detection Example ===\n");

    // Synthetic hourly consumption: daily sinusoidal load around 100
    // with a handful of injected spikes.
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let spike_indices = [40, 95, 170, 260, 310];
    let readings: Vec<Reading> = (0..360)
        .map(|i| {
            let hour = (i % 24) as f64;
            let mut value =
                100.0 + 30.0 * (2.0 * std::f64::consts::PI * (hour - 6.0) / 24.0).sin();
            if spike_indices.contains(&i) {
                value *= 2.5;
            }
            Reading::new(start + Duration::hours(i as i64), 1, value)
        })
        .collect();

    let (train, test) = readings.split_at(280);

    let mut detector = EnergyOutlierDetector::new(DetectorConfig::new(0.05));
    let metrics = detector.fit(train, 1)?;
    println!(
        "Trained on {} samples, {} features, training anomaly rate {:.1}%\n",
        metrics.training_samples,
        metrics.feature_count,
        metrics.anomaly_rate * 100.0
    );

    let report = detector.predict(test, 1)?;
    println!(
        "Detected {} anomalies in {} points ({:.1}%)",
        report.anomaly_count,
        report.total_points,
        report.anomaly_rate * 100.0
    );
    for anomaly in &report.anomalies {
        println!(
            "  {} value={:.1} expected={:.1} ({:+.0}%) severity={:?} type={:?}",
            anomaly.timestamp,
            anomaly.energy_value,
            anomaly.expected_value,
            anomaly.deviation_percent,
            anomaly.severity,
            anomaly.anomaly_type
        );
    }

    Ok(())
}
