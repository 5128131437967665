//! Multi-window pattern detectors.

pub mod decline;
pub mod sideways;

pub use decline::{detect_incremental_decline, DeclineResult, ScenarioResult};
pub use sideways::sideways_break_below_years;
