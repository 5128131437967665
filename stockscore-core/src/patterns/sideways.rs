//! Sideways-breakout age: years since the price last broke meaningfully
//! below the trailing 250-day low.
//!
//! Only consulted by the composite engine when blended volatility is low; a
//! long-lived floor under a calm stock reads as an established base.

use crate::domain::DailyBar;
use crate::events::TRADING_DAYS_PER_YEAR;

/// Upstream divides by 245 here while using 250 everywhere else. The
/// discrepancy is preserved; harmonizing would shift reported years by ~2%.
pub const SIDEWAYS_YEAR_DIVISOR: f64 = 245.0;

/// An earlier low must undercut the window low by this ratio to count as a
/// meaningful break below.
const BREAK_BELOW_RATIO: f64 = 0.95;

/// Returns 0 when no earlier bar ever dipped below the window minimum,
/// meaning the trailing low is an all-time-or-longer low.
pub fn sideways_break_below_years(bars: &[DailyBar]) -> i64 {
    if bars.is_empty() {
        return 0;
    }

    let window_len = bars.len().min(TRADING_DAYS_PER_YEAR);
    let window = &bars[bars.len() - window_len..];

    // Lowest low in the trailing window. NaN lows never compare below and
    // are naturally skipped.
    let mut min_idx = 0usize;
    let mut min_low = f64::INFINITY;
    for (i, bar) in window.iter().enumerate() {
        if bar.low < min_low {
            min_low = bar.low;
            min_idx = i;
        }
    }
    if !min_low.is_finite() {
        return 0;
    }

    let before_count = bars.len() - window_len + min_idx;
    let threshold = min_low * BREAK_BELOW_RATIO;

    // Most recent earlier bar that undercut the window low.
    for i in (0..before_count).rev() {
        if bars[i].low < threshold {
            return ((before_count - i) as f64 / SIDEWAYS_YEAR_DIVISOR).round() as i64;
        }
    }
    0
}
