//! Dispersion volatility (V1).
//!
//! Standard deviation over mean of the moving-average series, plus a
//! trimmed-extreme price-range term raised to the 3/2 power. The range term
//! captures how far the trimmed close extremes sit from the average level;
//! the exponent amplifies wide ranges.

use serde::Serialize;

use super::restrict_recent_years;
use crate::domain::DailyBar;
use crate::indicators::moving_average;
use crate::stats::{self, zero_filled};

/// Fraction trimmed off each end of the sorted closes before taking extremes.
const EXTREME_TRIM: f64 = 0.005;
/// Weight of the fluctuation term in the combined reading.
const FLUCT_WEIGHT: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolatilityDetails {
    pub ma_std: f64,
    pub ma_mean: f64,
    pub price_max: f64,
    pub price_min: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolatilityResult {
    pub volatility: f64,
    pub std_over_mean: f64,
    pub max_fluct: f64,
    pub details: VolatilityDetails,
}

impl VolatilityResult {
    /// Degenerate all-zero shape returned when the series is too short.
    /// Callers distinguish "no data" from "calm stock" by series length,
    /// not by this result.
    pub fn zero() -> Self {
        Self {
            volatility: 0.0,
            std_over_mean: 0.0,
            max_fluct: 0.0,
            details: VolatilityDetails {
                ma_std: 0.0,
                ma_mean: 0.0,
                price_max: 0.0,
                price_min: 0.0,
            },
        }
    }
}

pub fn compute_volatility(bars: &[DailyBar], ma_window: usize, years: i32) -> VolatilityResult {
    if bars.len() < ma_window + 2 {
        return VolatilityResult::zero();
    }

    let slice = restrict_recent_years(bars, ma_window, years);
    let ma = moving_average(slice, ma_window);
    let ma_mean = stats::mean(&ma);
    let ma_std = stats::population_std(&ma);
    let std_over_mean = ma_std / ma_mean;

    // Extreme-trimmed close range: drop the lowest and highest 0.5% of
    // closes, then take the extremes of what remains.
    let mut closes: Vec<f64> = slice.iter().map(|b| zero_filled(b.close)).collect();
    closes.sort_by(|a, b| a.total_cmp(b));
    let trim = (closes.len() as f64 * EXTREME_TRIM).floor() as usize;
    let kept = &closes[trim..closes.len() - trim];
    let price_min = kept[0];
    let price_max = kept[kept.len() - 1];

    let up_fluct = (price_max - ma_mean) / ma_mean;
    let down_fluct = (ma_mean - price_min) / ma_mean;
    let max_fluct = up_fluct.powf(1.5).max(down_fluct.powf(1.5));
    let volatility = std_over_mean + FLUCT_WEIGHT * max_fluct;

    VolatilityResult {
        volatility: stats::round_to(volatility, 4),
        std_over_mean: stats::round_to(std_over_mean, 4),
        max_fluct: stats::round_to(max_fluct, 4),
        details: VolatilityDetails {
            ma_std: stats::round_to(ma_std, 2),
            ma_mean: stats::round_to(ma_mean, 2),
            price_max: stats::round_to(price_max, 2),
            price_min: stats::round_to(price_min, 2),
        },
    }
}
