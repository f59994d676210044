//! Integration tests for the outlier detection module.

use chrono::{DateTime, Duration, TimeZone, Utc};
use features::Reading;
use outlier_facade::{
    AnomalyType, Detector, DetectorArtifact, DetectorConfig, DetectorRegistry,
    EnergyOutlierDetector, FittedDetector, OutlierError, Severity,
};

fn start() -> DateTime<Utc> {
    // Monday, 2024-01-01 00:00 UTC.
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Hourly readings with a daily sinusoidal load shape.
fn daily_load(building_id: u32, n: usize) -> Vec<Reading> {
    (0..n)
        .map(|i| {
            let hour = (i % 24) as f64;
            let value = 100.0 + 25.0 * (2.0 * std::f64::consts::PI * (hour - 6.0) / 24.0).sin();
            Reading::new(start() + Duration::hours(i as i64), building_id, value)
        })
        .collect()
}

#[test]
fn test_predict_before_fit_is_not_fitted() {
    let detector = EnergyOutlierDetector::default();
    assert!(!detector.is_fitted());
    let err = detector.predict(&daily_load(1, 24), 1).unwrap_err();
    assert!(matches!(err, OutlierError::NotFitted));
}

#[test]
fn test_insufficient_data_regardless_of_other_buildings() {
    let mut readings = daily_load(1, 60);
    readings.extend(daily_load(9, 500));

    let mut detector = EnergyOutlierDetector::default();
    let err = detector.fit(&readings, 1).unwrap_err();
    assert!(matches!(
        err,
        OutlierError::InsufficientData { required: 100, got: 60 }
    ));
}

#[test]
fn test_fit_metrics_reflect_configuration() {
    let mut detector = EnergyOutlierDetector::new(DetectorConfig::new(0.05));
    let metrics = detector.fit(&daily_load(1, 240), 1).unwrap();

    assert_eq!(metrics.training_samples, 240);
    assert_eq!(metrics.contamination, 0.05);
    assert!(metrics.avg_anomaly_score <= metrics.avg_normal_score);
}

#[test]
fn test_invalid_contamination_fails_fit() {
    let mut detector = EnergyOutlierDetector::new(DetectorConfig::new(0.75));
    let err = detector.fit(&daily_load(1, 240), 1).unwrap_err();
    assert!(matches!(err, OutlierError::InvalidParameter { .. }));
    assert!(!detector.is_fitted());
}

#[test]
fn test_severity_is_deterministic_in_score() {
    assert_eq!(Severity::from_score(-0.7), Severity::Critical);
    assert_eq!(Severity::from_score(-0.5), Severity::High);
    assert_eq!(Severity::from_score(-0.3), Severity::Medium);
    assert_eq!(Severity::from_score(-0.05), Severity::Low);
}

#[test]
fn test_report_shape() {
    let readings = daily_load(1, 200);
    let mut detector = EnergyOutlierDetector::default();
    detector.fit(&readings, 1).unwrap();

    let report = detector.predict(&readings, 1).unwrap();
    assert_eq!(report.total_points, 200);
    assert_eq!(report.anomaly_count, report.anomalies.len());
    assert!((report.anomaly_rate - report.anomaly_count as f64 / 200.0).abs() < 1e-12);
    assert!(report.score_statistics.min <= report.score_statistics.mean);
    assert!(report.score_statistics.mean <= report.score_statistics.max);
    for anomaly in &report.anomalies {
        assert!(anomaly.anomaly_score < 0.0);
        assert_eq!(anomaly.building_id, 1);
    }
}

#[test]
fn test_weather_features_flow_through() {
    let readings: Vec<Reading> = daily_load(1, 150)
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.with_temperature(15.0 + (i % 24) as f64 * 0.5))
        .collect();

    let mut detector = EnergyOutlierDetector::default();
    let metrics = detector.fit(&readings, 1).unwrap();
    // 20 base features plus air_temperature and temp_deviation.
    assert_eq!(metrics.feature_count, 22);
    assert!(detector.predict(&readings, 1).is_ok());
}

#[test]
fn test_artifact_round_trip_identical_predictions() {
    let readings = daily_load(4, 200);
    let fitted = FittedDetector::train(&DetectorConfig::default(), &readings, 4).unwrap();
    let before = fitted.predict(&readings, 4).unwrap();

    let json = DetectorArtifact::new(fitted).to_json().unwrap();
    let restored = DetectorArtifact::from_json(&json).unwrap().into_model();
    let after = restored.predict(&readings, 4).unwrap();

    assert_eq!(before.anomalies, after.anomalies);
    assert_eq!(before.score_statistics, after.score_statistics);
}

#[test]
fn test_restored_model_into_detector() {
    let readings = daily_load(4, 150);
    let fitted = FittedDetector::train(&DetectorConfig::default(), &readings, 4).unwrap();
    let json = DetectorArtifact::new(fitted).to_json().unwrap();

    let mut detector = EnergyOutlierDetector::default();
    detector.restore(DetectorArtifact::from_json(&json).unwrap().into_model());
    assert!(detector.is_fitted());
    assert!(detector.predict(&readings, 4).is_ok());
}

#[test]
fn test_registry_isolates_buildings() {
    let registry = DetectorRegistry::default();
    registry.fit(&daily_load(1, 150), 1).unwrap();

    // Building 2 has no model even though building 1 does.
    let err = registry.predict(&daily_load(2, 24), 2).unwrap_err();
    assert!(matches!(err, OutlierError::NotFitted));
}

#[test]
fn test_off_hours_classification_first_match_wins() {
    let mut readings = daily_load(1, 200);
    // 03:00 on a weekday, far above the running average: satisfies both
    // the off-hours rule and the generic spike rule.
    let idx = 8 * 24 + 3;
    readings[idx].meter_reading = 600.0;

    let mut detector = EnergyOutlierDetector::new(DetectorConfig::new(0.05));
    detector.fit(&readings, 1).unwrap();
    let report = detector.predict(&readings, 1).unwrap();

    let spike = report
        .anomalies
        .iter()
        .find(|a| a.timestamp == readings[idx].timestamp)
        .expect("injected spike must be flagged");
    assert_eq!(spike.anomaly_type, AnomalyType::OffHoursSpike);
    assert!(spike.deviation_percent > 50.0);
}
