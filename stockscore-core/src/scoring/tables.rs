//! Default scoring tables for the composite engine.
//!
//! Tables are declarative data, not code: recalibrating a band edits a step
//! list here (or in a TOML override file) and never touches the
//! interpolation logic in `piecewise`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::piecewise::{ScoreStep, ScoreTable};

const fn step(start: f64, end: f64, score_start: f64, score_end: f64) -> ScoreStep {
    ScoreStep { start, end, score_start, score_end }
}

/// The full table set consumed by `compute_score_with`.
///
/// `Default` carries the built-in calibration. A TOML override may replace
/// any subset of tables; omitted tables keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTables {
    /// Blended volatility, weight 30: low-to-moderate readings rewarded,
    /// anything from 3 up scores nothing.
    pub volatility: ScoreTable,
    /// Trailing-year long-bull day count, weight 10.
    pub long_bull: ScoreTable,
    /// Recent/prior average volume ratio on a matched decline, weight 20.
    pub volume_increase: ScoreTable,
    /// Recent/prior average close ratio on a matched decline, weight 20:
    /// deeper declines score higher.
    pub price_ratio: ScoreTable,
    /// Years since the last break below the trailing low, weight 20:
    /// ten years or more earns the full band.
    pub sideways_years: ScoreTable,
    /// Length of one consecutive limit-up run, weight 10: short runs score
    /// mildly positive, runs of ten or more take a steep penalty.
    pub limit_up_run: ScoreTable,
    /// Locked limit-down day count, weight 20: penalty-only.
    pub locked_limit_down: ScoreTable,
}

impl Default for ScoreTables {
    fn default() -> Self {
        Self {
            volatility: ScoreTable::new(
                30.0,
                vec![
                    step(0.0, 0.2, 8.0, 9.0),
                    step(0.2, 0.8, 9.0, 10.0),
                    step(0.8, 1.5, 10.0, 6.0),
                    step(1.5, 3.0, 6.0, 0.0),
                ],
            ),
            long_bull: ScoreTable::new(
                10.0,
                vec![
                    step(1.0, 5.0, 2.0, 5.0),
                    step(5.0, 15.0, 5.0, 10.0),
                    step(15.0, 250.0, 10.0, 10.0),
                ],
            ),
            volume_increase: ScoreTable::new(
                20.0,
                vec![
                    step(1.0, 1.5, 3.0, 6.0),
                    step(1.5, 2.5, 6.0, 10.0),
                    step(2.5, 10.0, 10.0, 10.0),
                ],
            ),
            price_ratio: ScoreTable::new(
                20.0,
                vec![step(0.2, 0.5, 10.0, 7.0), step(0.5, 0.9, 7.0, 3.0)],
            ),
            sideways_years: ScoreTable::new(
                20.0,
                vec![
                    step(1.0, 3.0, 2.0, 4.0),
                    step(3.0, 10.0, 4.0, 10.0),
                    step(10.0, 100.0, 10.0, 10.0),
                ],
            ),
            limit_up_run: ScoreTable::new(
                10.0,
                vec![
                    step(2.0, 6.0, 2.0, 5.0),
                    step(6.0, 10.0, 5.0, -5.0),
                    step(10.0, 40.0, -15.0, -30.0),
                ],
            ),
            locked_limit_down: ScoreTable::new(
                20.0,
                vec![step(1.0, 3.0, -3.0, -6.0), step(3.0, 10.0, -6.0, -10.0)],
            ),
        }
    }
}

impl ScoreTables {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn from_file(path: &Path) -> Result<Self, TablesError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&text)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TablesError {
    #[error("failed to read tables file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tables file: {0}")]
    Parse(#[from] toml::de::Error),
}
