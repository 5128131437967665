//! Volatility measures over a year-restricted moving-average series.
//!
//! Two readings share the same restriction step:
//! - dispersion (V1): std-over-mean plus a trimmed-extreme price-range term
//! - difference (V2): std-over-mean plus first-difference std, as one scalar

pub mod difference;
pub mod dispersion;

pub use difference::compute_volatility_v2;
pub use dispersion::{compute_volatility, VolatilityDetails, VolatilityResult};

use chrono::Datelike;

use crate::domain::DailyBar;

pub const DEFAULT_MA_WINDOW: usize = 60;
pub const DEFAULT_YEARS_LOOKBACK: i32 = 5;

/// Restrict to bars whose calendar year falls within the trailing `years`
/// window ending at the last bar's year. If the restricted slice cannot
/// produce a moving-average series with at least two points, fall back to
/// the last `ma_window + 2` bars of the full series.
pub(crate) fn restrict_recent_years(
    bars: &[DailyBar],
    ma_window: usize,
    years: i32,
) -> &[DailyBar] {
    let last = match bars.last() {
        Some(bar) => bar,
        None => return bars,
    };
    let cutoff_year = last.date.year() - years + 1;
    let start = bars
        .iter()
        .position(|b| b.date.year() >= cutoff_year)
        .unwrap_or(0);
    let restricted = &bars[start..];

    let min_len = ma_window + 2;
    if restricted.len() < min_len {
        if bars.len() >= min_len {
            &bars[bars.len() - min_len..]
        } else {
            bars
        }
    } else {
        restricted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::make_bars;

    #[test]
    fn keeps_only_recent_years() {
        // ~6 years of daily bars starting 2020-01-02.
        let bars = make_bars(&vec![100.0; 2200]);
        let restricted = restrict_recent_years(&bars, 60, 5);
        // Cutoff year is last.year - 4; everything from Jan 1 of that year on.
        let cutoff = bars.last().unwrap().date.year() - 4;
        assert!(restricted.iter().all(|b| b.date.year() >= cutoff));
        assert!(restricted.len() < bars.len());
        // First kept bar is the earliest one in the cutoff year.
        let first_kept = bars.iter().position(|b| b.date.year() >= cutoff).unwrap();
        assert_eq!(restricted.len(), bars.len() - first_kept);
    }

    #[test]
    fn short_restriction_falls_back_to_tail() {
        // 370 bars ending just after a year boundary: the 1-year restriction
        // alone would keep only a handful of bars, fewer than window + 2.
        let bars = make_bars(&vec![100.0; 370]);
        // Last bar is 2021-01-05; with years=1 only the 2021 bars qualify.
        let restricted = restrict_recent_years(&bars, 60, 1);
        assert_eq!(restricted.len(), 62);
        assert_eq!(restricted.last().unwrap().date, bars.last().unwrap().date);
    }

    #[test]
    fn whole_series_when_everything_is_short() {
        let bars = make_bars(&[1.0, 2.0, 3.0]);
        let restricted = restrict_recent_years(&bars, 60, 5);
        assert_eq!(restricted.len(), 3);
    }

    #[test]
    fn empty_series_passes_through() {
        let restricted = restrict_recent_years(&[], 60, 5);
        assert!(restricted.is_empty());
    }
}
