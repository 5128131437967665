//! Composite scoring engine — the single entry point that runs every
//! measure and folds them into a weighted main score plus a conditional
//! extra score.
//!
//! Pure pipeline: one ascending bar slice in, freshly allocated results out,
//! no state between calls, no failure path (insufficient data degrades each
//! sub-measure to its zero shape instead).

use serde::Serialize;

use super::tables::ScoreTables;
use crate::domain::DailyBar;
use crate::events::{
    consecutive_limit_up_runs, count_down_limit_days, count_locked_limit_down_days,
    count_long_bull_days, DEFAULT_BULL_THRESHOLD,
};
use crate::patterns::decline::{detect_incremental_decline, DeclineResult};
use crate::patterns::sideways::sideways_break_below_years;
use crate::stats::round_to;
use crate::volatility::{
    compute_volatility, compute_volatility_v2, VolatilityResult, DEFAULT_MA_WINDOW,
    DEFAULT_YEARS_LOOKBACK,
};

/// Below this blended volatility the sideways and limit-up extra measures run.
pub const LOW_VOLATILITY_GATE: f64 = 0.5;
/// Flat bonus awarded when the decline-with-volume pattern matches.
pub const DECLINE_MATCH_BONUS: f64 = 20.0;

/// Parameters of the secondary (4-year) volatility reading used in the blend.
const BLEND_MA_WINDOW: usize = 48;
const BLEND_YEARS: i32 = 4;

/// One scored measure: raw value, weighted score, table weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub name: &'static str,
    pub value: f64,
    pub score: f64,
    pub weight: f64,
}

impl ScoreComponent {
    fn new(name: &'static str, value: f64, score: f64, weight: f64) -> Self {
        Self { name, value, score, weight }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// Sum of the main weighted sub-scores, rounded to 2 decimal places.
    pub score: f64,
    /// Conditional bonus/penalty, only populated under the low-volatility
    /// gate; kept separate from the main score.
    pub extra_score: f64,
    pub volatility: ScoreComponent,
    pub long_bull: ScoreComponent,
    pub volume_increase: ScoreComponent,
    pub price_ratio: ScoreComponent,
    pub incremental_decline: ScoreComponent,
    pub sideways_break_below_years: ScoreComponent,
    pub locked_limit_down: ScoreComponent,
    pub consecutive_limit_up: ScoreComponent,
    /// Full scenario diagnostics from the decline scan.
    pub decline: DeclineResult,
}

/// Blend the two volatility readings: the 4-year reading only matters while
/// the 5-year one is still calm (< 1); past that the 5-year reading stands.
pub fn blended_volatility(volatility_5y: f64, volatility_4y: f64) -> f64 {
    if volatility_5y < 1.0 {
        volatility_4y.min(volatility_5y)
    } else {
        volatility_5y
    }
}

pub fn compute_score(bars: &[DailyBar]) -> ScoreResult {
    compute_score_with(bars, &ScoreTables::default())
}

pub fn compute_score_with(bars: &[DailyBar], tables: &ScoreTables) -> ScoreResult {
    let volatility_5y =
        compute_volatility(bars, DEFAULT_MA_WINDOW, DEFAULT_YEARS_LOOKBACK).volatility;
    let volatility_4y = compute_volatility(bars, BLEND_MA_WINDOW, BLEND_YEARS).volatility;
    let blended = blended_volatility(volatility_5y, volatility_4y);
    let volatility_score = tables.volatility.score(blended);

    let long_bull_count = count_long_bull_days(bars, DEFAULT_BULL_THRESHOLD, 1);
    let long_bull_score = tables.long_bull.score(long_bull_count as f64);

    let decline = detect_incremental_decline(bars);
    let mut volume_ratio = 0.0;
    let mut volume_score = 0.0;
    let mut price_ratio = 0.0;
    let mut price_score = 0.0;
    let mut decline_bonus = 0.0;
    if decline.is_decline {
        if let Some(hit) = decline.final_scenario.as_ref() {
            volume_ratio = round_to(hit.avg_vol_recent / hit.avg_vol_compare, 2);
            price_ratio = round_to(hit.avg_close_recent / hit.avg_close_compare, 2);
            volume_score = tables.volume_increase.score(volume_ratio);
            price_score = tables.price_ratio.score(price_ratio);
            decline_bonus = DECLINE_MATCH_BONUS;
        }
    }

    let mut sideways_years = 0i64;
    let mut sideways_score = 0.0;
    let mut limit_up_days = 0usize;
    let mut limit_up_score = 0.0;
    if blended < LOW_VOLATILITY_GATE {
        sideways_years = sideways_break_below_years(bars);
        sideways_score = tables.sideways_years.score(sideways_years as f64);

        let runs = consecutive_limit_up_runs(bars);
        limit_up_days = runs.iter().sum();
        limit_up_score = runs
            .iter()
            .map(|&len| tables.limit_up_run.score(len as f64))
            .sum();
    }

    let locked_count = count_locked_limit_down_days(bars, 1);
    let locked_score = tables.locked_limit_down.score(locked_count as f64);

    let score = round_to(
        volatility_score + long_bull_score + volume_score + price_score + decline_bonus
            + locked_score,
        2,
    );
    let extra_score = round_to(sideways_score + limit_up_score, 2);

    ScoreResult {
        score,
        extra_score,
        volatility: ScoreComponent::new(
            "volatility",
            blended,
            volatility_score,
            tables.volatility.weight,
        ),
        long_bull: ScoreComponent::new(
            "long_bull_days",
            long_bull_count as f64,
            long_bull_score,
            tables.long_bull.weight,
        ),
        volume_increase: ScoreComponent::new(
            "volume_increase_ratio",
            volume_ratio,
            volume_score,
            tables.volume_increase.weight,
        ),
        price_ratio: ScoreComponent::new(
            "price_ratio",
            price_ratio,
            price_score,
            tables.price_ratio.weight,
        ),
        incremental_decline: ScoreComponent::new(
            "incremental_decline",
            if decline.is_decline { 1.0 } else { 0.0 },
            decline_bonus,
            DECLINE_MATCH_BONUS,
        ),
        sideways_break_below_years: ScoreComponent::new(
            "sideways_break_below_years",
            sideways_years as f64,
            sideways_score,
            tables.sideways_years.weight,
        ),
        locked_limit_down: ScoreComponent::new(
            "locked_limit_down_days",
            locked_count as f64,
            locked_score,
            tables.locked_limit_down.weight,
        ),
        consecutive_limit_up: ScoreComponent::new(
            "consecutive_limit_up_days",
            limit_up_days as f64,
            limit_up_score,
            tables.limit_up_run.weight,
        ),
        decline,
    }
}

/// Summary statistics bundle for table display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockStats {
    pub volatility: VolatilityResult,
    pub volatility_v2: f64,
    pub long_bull_count: usize,
    pub down_limit_count: usize,
    pub locked_limit_down_count: usize,
}

pub fn compute_stock_stats(bars: &[DailyBar]) -> StockStats {
    StockStats {
        volatility: compute_volatility(bars, DEFAULT_MA_WINDOW, DEFAULT_YEARS_LOOKBACK),
        volatility_v2: compute_volatility_v2(bars, DEFAULT_MA_WINDOW, DEFAULT_YEARS_LOOKBACK),
        long_bull_count: count_long_bull_days(bars, DEFAULT_BULL_THRESHOLD, 1),
        down_limit_count: count_down_limit_days(bars, 1),
        locked_limit_down_count: count_locked_limit_down_days(bars, 1),
    }
}
