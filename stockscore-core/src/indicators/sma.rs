//! Simple moving average of close prices.
//!
//! Compact output: element `i` is the mean of closes over bars
//! `[i, i + window)` of whatever slice was passed in, so the result has
//! `len - window + 1` entries and is empty when the series is shorter than
//! the window. No error is raised; callers check length before consuming.

use crate::domain::DailyBar;
use crate::stats::zero_filled;

pub fn moving_average(bars: &[DailyBar], window: usize) -> Vec<f64> {
    assert!(window >= 1, "moving average window must be >= 1");
    if bars.len() < window {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(bars.len() - window + 1);

    // Rolling sum over zero-filled closes; a missing close contributes 0.
    let mut sum: f64 = bars[..window].iter().map(|b| zero_filled(b.close)).sum();
    out.push(sum / window as f64);

    for i in window..bars.len() {
        sum += zero_filled(bars[i].close) - zero_filled(bars[i - window].close);
        out.push(sum / window as f64);
    }

    out
}
