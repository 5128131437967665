//! Rolling-window indicators consumed by the scoring pipeline.

pub mod sma;

pub use sma::moving_average;
