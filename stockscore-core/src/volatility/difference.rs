//! Difference volatility (V2).
//!
//! Std-over-mean of the moving-average series plus the standard deviation of
//! its first differences, collapsed to a single scalar. Shares the year
//! restriction with the dispersion reading.

use super::restrict_recent_years;
use crate::domain::DailyBar;
use crate::indicators::moving_average;
use crate::stats;

pub const DEFAULT_ALPHA: f64 = 1.0;
pub const DEFAULT_BETA: f64 = 1.0;

pub fn compute_volatility_v2(bars: &[DailyBar], ma_window: usize, years: i32) -> f64 {
    compute_volatility_v2_weighted(bars, ma_window, years, DEFAULT_ALPHA, DEFAULT_BETA)
}

/// Weighted form: `alpha * (std / mean) + beta * diff_std`, rounded to 4
/// decimal places. Returns 0.0 when the series is too short.
pub fn compute_volatility_v2_weighted(
    bars: &[DailyBar],
    ma_window: usize,
    years: i32,
    alpha: f64,
    beta: f64,
) -> f64 {
    if bars.len() < ma_window + 2 {
        return 0.0;
    }

    let slice = restrict_recent_years(bars, ma_window, years);
    let ma = moving_average(slice, ma_window);
    let ma_mean = stats::mean(&ma);
    let ma_std = stats::population_std(&ma);

    let diffs = stats::first_differences(&ma);
    let diff_std = stats::population_std(&diffs);

    stats::round_to(alpha * (ma_std / ma_mean) + beta * diff_std, 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{assert_approx, make_bars};

    #[test]
    fn short_series_is_zero() {
        let bars = make_bars(&vec![100.0; 61]);
        assert_eq!(compute_volatility_v2(&bars, 60, 5), 0.0);
        assert_eq!(compute_volatility_v2(&[], 60, 5), 0.0);
    }

    #[test]
    fn flat_series_is_zero() {
        let bars = make_bars(&vec![100.0; 300]);
        assert_eq!(compute_volatility_v2(&bars, 60, 5), 0.0);
    }

    #[test]
    fn linear_ramp_exact_value() {
        // Window 2 over [1..=6]: MA = [1.5, 2.5, 3.5, 4.5, 5.5].
        // mean = 3.5, population std = sqrt(2); diffs are all 1 -> std 0.
        let bars = make_bars(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let result = compute_volatility_v2(&bars, 2, 5);
        assert_approx(result, stats::round_to(2.0f64.sqrt() / 3.5, 4), 1e-12);
    }

    #[test]
    fn beta_weights_the_difference_term() {
        // Alternating closes produce nonzero MA differences.
        let closes: Vec<f64> = (0..200)
            .map(|i| if i % 2 == 0 { 100.0 } else { 110.0 })
            .collect();
        let bars = make_bars(&closes);
        let base = compute_volatility_v2_weighted(&bars, 3, 5, 1.0, 0.0);
        let with_diff = compute_volatility_v2_weighted(&bars, 3, 5, 1.0, 1.0);
        assert!(with_diff > base);
    }
}
