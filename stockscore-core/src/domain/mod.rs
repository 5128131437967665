//! Core data model for daily bar series.

pub mod bar;

pub use bar::DailyBar;

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = close, high = close + 1.0,
/// low = close - 1.0, volume = 1000, percent_change = 0. Dates are
/// consecutive calendar days starting 2020-01-02, so long series span
/// multiple calendar years. Tests mutate individual fields as needed.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<DailyBar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| DailyBar {
            date: base_date + chrono::Duration::days(i as i64),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000.0,
            percent_change: 0.0,
            turnover_rate: None,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for numeric tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
