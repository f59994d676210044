//! Basic example demonstrating seasonal energy forecasting
//!
//! Run with: cargo run --example basic -p forecast-facade

use chrono::{Datelike, Duration, TimeZone, Timelike, Utc};
use features::Reading;
use forecast_facade::{EnergyForecaster, Forecaster, Frequency};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Seasonal Energy Forecasting Example ===\n");

    // Three weeks of synthetic hourly consumption: office-style daily
    // cycle with reduced weekend load.
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let readings: Vec<Reading> = (0..24 * 21)
        .map(|i| {
            let ts = start + Duration::hours(i as i64);
            let weekend = ts.weekday().num_days_from_monday() >= 5;
            let base = if weekend { 130.0 } else { 240.0 };
            let daily = 50.0
                * (2.0 * std::f64::consts::PI * (ts.hour() as f64 - 9.0) / 24.0).sin();
            Reading::new(ts, 1, base + daily)
        })
        .collect();

    let mut forecaster = EnergyForecaster::default();
    let metrics = forecaster.fit(&readings, 1)?;
    println!("Training metrics: {metrics:?}\n");

    let report = forecaster.forecast(24, Frequency::Hourly)?;
    println!(
        "Next 24h: total={:.0} avg={:.1} trend={:?}",
        report.summary.total_predicted,
        report.summary.average_predicted,
        report.summary.trend
    );
    println!(
        "Peak at {}, trough at {}\n",
        report.summary.peak_period, report.summary.trough_period
    );
    for point in &report.forecast {
        println!(
            "  {}  {:.1}  [{:.1}, {:.1}]",
            point.timestamp, point.predicted_value, point.lower_bound, point.upper_bound
        );
    }

    Ok(())
}
