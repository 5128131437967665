//! Rule-based event counters over a trailing one-year window.
//!
//! All counters operate on the trailing `years * 250` bars and silently use
//! the whole series when it is shorter. Predicates on NaN fields are false,
//! so bars with missing data simply never count.

use crate::domain::DailyBar;

/// One calendar year approximated in trading days. The sideways-breakout
/// detector divides by 245 instead (see `patterns::sideways`); the upstream
/// source carries both values and they are deliberately not unified.
pub const TRADING_DAYS_PER_YEAR: usize = 250;

/// Daily percent change at or below which a bar counts as limit-down.
pub const DOWN_LIMIT_PCT: f64 = -9.8;
/// Daily percent change at or above which a bar counts as limit-up.
pub const LIMIT_UP_PCT: f64 = 9.9;
/// Default gain threshold (percent) for a long-bull day.
pub const DEFAULT_BULL_THRESHOLD: f64 = 6.0;

fn trailing_years(bars: &[DailyBar], years: usize) -> &[DailyBar] {
    let n = years * TRADING_DAYS_PER_YEAR;
    if bars.len() > n {
        &bars[bars.len() - n..]
    } else {
        bars
    }
}

/// Bars whose intraday gain over the open, or reported percent change,
/// exceeds `threshold` percent.
pub fn count_long_bull_days(bars: &[DailyBar], threshold: f64, years: usize) -> usize {
    trailing_years(bars, years)
        .iter()
        .filter(|b| {
            (b.high - b.open) / b.open * 100.0 > threshold || b.percent_change > threshold
        })
        .count()
}

/// Bars at or below the daily down-limit.
pub fn count_down_limit_days(bars: &[DailyBar], years: usize) -> usize {
    trailing_years(bars, years)
        .iter()
        .filter(|b| b.percent_change <= DOWN_LIMIT_PCT)
        .count()
}

/// Limit-down bars that opened at the capped price and stayed there
/// ("one-word" limit-down: open equals close on a down-limit day).
pub fn count_locked_limit_down_days(bars: &[DailyBar], years: usize) -> usize {
    trailing_years(bars, years)
        .iter()
        .filter(|b| b.open == b.close && b.percent_change <= DOWN_LIMIT_PCT)
        .count()
}

/// Maximal runs of consecutive limit-up bars within the trailing year.
/// Only runs of length >= 2 are reported, in chronological order.
pub fn consecutive_limit_up_runs(bars: &[DailyBar]) -> Vec<usize> {
    let mut runs = Vec::new();
    let mut current = 0usize;
    for bar in trailing_years(bars, 1) {
        if bar.percent_change >= LIMIT_UP_PCT {
            current += 1;
        } else {
            if current >= 2 {
                runs.push(current);
            }
            current = 0;
        }
    }
    if current >= 2 {
        runs.push(current);
    }
    runs
}
