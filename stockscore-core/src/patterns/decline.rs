//! "Decline with rising volume" scanner.
//!
//! Compares a recent window's average close and volume against the window
//! immediately before it, over five fixed window pairs, shortest recent
//! window first. The first pair showing both a price decline and a volume
//! increase wins; a sharp average price rise aborts the scan early, since no
//! longer horizon can then qualify as a decline.

use serde::Serialize;

use crate::domain::DailyBar;
use crate::stats::{self, mean_by};

/// Minimum history (bars, ~2.5 years) before any scenario is evaluated.
pub const MIN_BARS: usize = 756;

/// Recent average volume must exceed the prior average by more than this.
const VOLUME_INCREASE_THRESHOLD: f64 = 0.25;
/// Recent average close must sit at least this far below the prior average.
const PRICE_DECLINE_THRESHOLD: f64 = 0.10;
/// A rise beyond this margin stops the scan outright.
const SHARP_INCREASE_THRESHOLD: f64 = 0.20;

/// (recent window, prior window, label), evaluated in order.
const SCENARIOS: [(usize, usize, &str); 5] = [
    (126, 250, "half-year vs prior 1yr"),
    (126, 504, "half-year vs prior 2yr"),
    (252, 504, "1yr vs prior 2yr"),
    (378, 504, "1.5yr vs prior 2yr"),
    (504, 504, "2yr vs prior 2yr"),
];

/// Diagnostics for one evaluated scenario, recorded match or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub label: &'static str,
    pub recent_len: usize,
    pub prior_len: usize,
    pub avg_close_recent: f64,
    pub avg_close_compare: f64,
    pub avg_vol_recent: f64,
    pub avg_vol_compare: f64,
    pub price_declined: bool,
    pub volume_increased: bool,
    pub sharp_increase: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclineResult {
    pub is_decline: bool,
    /// Label of the matched scenario, if any.
    pub scenario: Option<&'static str>,
    /// Every evaluated scenario in order, including non-matches.
    pub scenarios: Vec<ScenarioResult>,
    /// The last evaluated scenario. A match always stops the scan, so this
    /// is the matched scenario whenever `is_decline` is true.
    pub final_scenario: Option<ScenarioResult>,
    pub insufficient_data: bool,
}

impl DeclineResult {
    fn insufficient() -> Self {
        Self {
            is_decline: false,
            scenario: None,
            scenarios: Vec::new(),
            final_scenario: None,
            insufficient_data: true,
        }
    }
}

pub fn detect_incremental_decline(bars: &[DailyBar]) -> DeclineResult {
    if bars.len() < MIN_BARS {
        return DeclineResult::insufficient();
    }

    let mut scenarios: Vec<ScenarioResult> = Vec::new();
    let mut matched: Option<&'static str> = None;

    for (recent_len, prior_len, label) in SCENARIOS {
        if bars.len() < recent_len + prior_len {
            continue;
        }
        let recent = &bars[bars.len() - recent_len..];
        let compare = &bars[bars.len() - recent_len - prior_len..bars.len() - recent_len];

        let avg_close_recent = mean_by(recent, |b| b.close);
        let avg_close_compare = mean_by(compare, |b| b.close);
        let avg_vol_recent = mean_by(recent, |b| b.volume);
        let avg_vol_compare = mean_by(compare, |b| b.volume);

        let volume_increased =
            avg_vol_recent * (1.0 - VOLUME_INCREASE_THRESHOLD) > avg_vol_compare;
        let price_declined =
            avg_close_recent * (1.0 - PRICE_DECLINE_THRESHOLD) < avg_close_compare;
        let sharp_increase =
            avg_close_recent * (1.0 - SHARP_INCREASE_THRESHOLD) > avg_close_compare;

        scenarios.push(ScenarioResult {
            label,
            recent_len,
            prior_len,
            avg_close_recent: stats::round_to(avg_close_recent, 2),
            avg_close_compare: stats::round_to(avg_close_compare, 2),
            avg_vol_recent: stats::round_to(avg_vol_recent, 2),
            avg_vol_compare: stats::round_to(avg_vol_compare, 2),
            price_declined,
            volume_increased,
            sharp_increase,
        });

        if !price_declined {
            if sharp_increase {
                // Price clearly rose; no decline scenario can apply further out.
                break;
            }
            continue;
        }
        if volume_increased {
            matched = Some(label);
            break;
        }
    }

    let final_scenario = scenarios.last().cloned();
    DeclineResult {
        is_decline: matched.is_some(),
        scenario: matched,
        scenarios,
        final_scenario,
        insufficient_data: false,
    }
}
