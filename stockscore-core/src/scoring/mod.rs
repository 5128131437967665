//! Piecewise scoring tables and the composite engine built on them.

pub mod engine;
pub mod piecewise;
pub mod tables;

pub use engine::{
    blended_volatility, compute_score, compute_score_with, compute_stock_stats, ScoreComponent,
    ScoreResult, StockStats,
};
pub use piecewise::{ScoreStep, ScoreTable};
pub use tables::{ScoreTables, TablesError};
