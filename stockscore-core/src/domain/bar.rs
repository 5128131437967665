//! DailyBar — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OHLCV bar plus feed-derived percentage fields for one instrument on one day.
///
/// Every numeric field is individually NaN-tolerant: the upstream feed may
/// omit any of them on any given bar, and all downstream aggregates count a
/// missing value as an exact zero contribution (see `stats`). A series is an
/// ascending-by-date slice of these; the engine only reads, never mutates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Daily close-over-close change in percent, as reported by the feed.
    /// May disagree with the same bar's open/close delta; both are consulted
    /// where the upstream provides them.
    pub percent_change: f64,
    /// Presentation-only passthrough; no calculation here reads it.
    #[serde(default)]
    pub turnover_rate: Option<f64>,
}

impl DailyBar {
    /// Returns true if any numeric field the engine reads is NaN.
    pub fn has_missing_fields(&self) -> bool {
        self.open.is_nan()
            || self.high.is_nan()
            || self.low.is_nan()
            || self.close.is_nan()
            || self.volume.is_nan()
            || self.percent_change.is_nan()
    }
}
