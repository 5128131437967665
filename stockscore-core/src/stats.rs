//! Aggregation primitives with missing-value tolerance.
//!
//! Upstream bars may carry NaN in any numeric field. Historical score outputs
//! depend on every aggregate counting such a value as exactly zero, not on
//! skipping it, so all helpers here zero-fill before summing. Changing this
//! to NaN-skipping would shift scores on real feeds with sparse fields.

use crate::domain::DailyBar;

/// Map a missing (NaN) value to the zero contribution the aggregates use.
pub fn zero_filled(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Arithmetic mean, NaN contributors counted as zero. Empty input yields 0.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| zero_filled(v)).sum::<f64>() / values.len() as f64
}

/// Mean of a projected bar field, with the same zero-fill rule.
pub fn mean_by<F>(bars: &[DailyBar], f: F) -> f64
where
    F: Fn(&DailyBar) -> f64,
{
    if bars.is_empty() {
        return 0.0;
    }
    bars.iter().map(|b| zero_filled(f(b))).sum::<f64>() / bars.len() as f64
}

/// Population standard deviation (divide by n), NaN contributors as zero.
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values
        .iter()
        .map(|&v| {
            let d = zero_filled(v) - m;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// `values[i] - values[i-1]` for i >= 1. Empty for fewer than two points.
pub fn first_differences(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Round to `decimals` places (display-compatible half-away-from-zero).
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
