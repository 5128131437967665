//! StockScore Core — volatility measures, event counters, pattern detectors,
//! and the composite weighted scoring engine over daily bar series.
//!
//! Everything here is pure and synchronous: a scoring call reads one
//! ascending `&[DailyBar]` slice, allocates its own results, and keeps no
//! state between calls. Insufficient data never raises; it is encoded in the
//! return value (zero-shape volatility, empty scenario list, zero counts).
//! The only fallible surface is file loading in `data`.

pub mod data;
pub mod domain;
pub mod events;
pub mod indicators;
pub mod patterns;
pub mod scoring;
pub mod stats;
pub mod volatility;

pub use domain::DailyBar;
pub use events::{
    consecutive_limit_up_runs, count_down_limit_days, count_locked_limit_down_days,
    count_long_bull_days,
};
pub use patterns::{detect_incremental_decline, sideways_break_below_years, DeclineResult,
    ScenarioResult};
pub use scoring::{
    compute_score, compute_score_with, compute_stock_stats, ScoreComponent, ScoreResult,
    ScoreStep, ScoreTable, ScoreTables, StockStats,
};
pub use volatility::{compute_volatility, compute_volatility_v2, VolatilityResult};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything the dashboard hands between worker
    /// threads is Send + Sync. The host issues one scoring call per visible
    /// stock and may run several in parallel, so a regression here breaks
    /// the build immediately instead of surfacing later.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::DailyBar>();
        require_sync::<domain::DailyBar>();

        // Result types
        require_send::<VolatilityResult>();
        require_sync::<VolatilityResult>();
        require_send::<DeclineResult>();
        require_sync::<DeclineResult>();
        require_send::<ScenarioResult>();
        require_sync::<ScenarioResult>();
        require_send::<ScoreResult>();
        require_sync::<ScoreResult>();
        require_send::<ScoreComponent>();
        require_sync::<ScoreComponent>();
        require_send::<StockStats>();
        require_sync::<StockStats>();

        // Config types
        require_send::<ScoreTables>();
        require_sync::<ScoreTables>();
        require_send::<ScoreTable>();
        require_sync::<ScoreTable>();
        require_send::<ScoreStep>();
        require_sync::<ScoreStep>();

        // Loader error
        require_send::<data::DataError>();
        require_sync::<data::DataError>();
    }

    /// The engine takes shared slices and returns owned values; nothing in
    /// the public API can mutate a caller's series. This test documents the
    /// invariant — the signatures themselves enforce it.
    #[test]
    fn scoring_api_takes_shared_slices() {
        fn _check(bars: &[DailyBar]) -> ScoreResult {
            compute_score(bars)
        }
    }
}
