//! Generic piecewise-linear scoring over ordered step tables.
//!
//! A table is pure data: ordered half-open `[start, end)` steps, each with a
//! score range, plus a weight applied as `weight / 10`. The scorer knows
//! nothing about the metric it scores; every scoring call in the composite
//! engine goes through here, so new bands never touch interpolation logic.

use serde::{Deserialize, Serialize};

use crate::stats::round_to;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreStep {
    pub start: f64,
    pub end: f64,
    pub score_start: f64,
    pub score_end: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable {
    pub weight: f64,
    pub steps: Vec<ScoreStep>,
}

impl ScoreTable {
    pub fn new(weight: f64, steps: Vec<ScoreStep>) -> Self {
        Self { weight, steps }
    }

    /// Score a raw value against this table.
    ///
    /// NaN and exactly-zero values score 0, as does anything outside every
    /// step. A degenerate step with `start == end` acts as a point lookup
    /// and returns `score_start` without weight scaling (upstream behavior).
    /// Otherwise the first containing step interpolates linearly and the
    /// result is scaled by `weight / 10` and rounded to 2 decimal places.
    pub fn score(&self, value: f64) -> f64 {
        if value.is_nan() || value == 0.0 {
            return 0.0;
        }
        for step in &self.steps {
            if step.start == step.end {
                if value == step.start {
                    return step.score_start;
                }
                continue;
            }
            if value >= step.start && value < step.end {
                let ratio = (value - step.start) / (step.end - step.start);
                let raw = step.score_start + (step.score_end - step.score_start) * ratio;
                return round_to(raw * (self.weight / 10.0), 2);
            }
        }
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{assert_approx, DEFAULT_EPSILON};

    fn table() -> ScoreTable {
        ScoreTable::new(
            20.0,
            vec![
                ScoreStep { start: 1.0, end: 2.0, score_start: 4.0, score_end: 8.0 },
                ScoreStep { start: 2.0, end: 5.0, score_start: 8.0, score_end: 10.0 },
            ],
        )
    }

    #[test]
    fn value_at_step_start_scores_score_start_weighted() {
        // score_start * (weight / 10)
        assert_eq!(table().score(1.0), 8.0);
        assert_eq!(table().score(2.0), 16.0);
    }

    #[test]
    fn value_approaching_end_tends_to_score_end_weighted() {
        let just_below = 2.0 - 1e-9;
        assert_approx(table().score(just_below), 16.0, 1e-6);
    }

    #[test]
    fn midpoint_interpolates_linearly() {
        // Halfway through [1, 2): 4 + (8 - 4) * 0.5 = 6, times 2.
        assert_approx(table().score(1.5), 12.0, DEFAULT_EPSILON);
    }

    #[test]
    fn nan_and_zero_score_zero() {
        assert_eq!(table().score(f64::NAN), 0.0);
        assert_eq!(table().score(0.0), 0.0);
    }

    #[test]
    fn out_of_range_scores_zero() {
        assert_eq!(table().score(0.5), 0.0);
        assert_eq!(table().score(5.0), 0.0);
        assert_eq!(table().score(-3.0), 0.0);
    }

    #[test]
    fn first_matching_step_wins() {
        let overlapping = ScoreTable::new(
            10.0,
            vec![
                ScoreStep { start: 0.0, end: 10.0, score_start: 1.0, score_end: 1.0 },
                ScoreStep { start: 0.0, end: 10.0, score_start: 9.0, score_end: 9.0 },
            ],
        );
        assert_eq!(overlapping.score(5.0), 1.0);
    }

    #[test]
    fn point_step_returns_unweighted_score_start() {
        let point = ScoreTable::new(
            30.0,
            vec![ScoreStep { start: 7.0, end: 7.0, score_start: 5.0, score_end: 99.0 }],
        );
        // Not scaled by weight/10 on the degenerate step.
        assert_eq!(point.score(7.0), 5.0);
        assert_eq!(point.score(7.5), 0.0);
    }

    #[test]
    fn negative_scores_pass_through_weighting() {
        let penalty = ScoreTable::new(
            20.0,
            vec![ScoreStep { start: 1.0, end: 3.0, score_start: -5.0, score_end: -10.0 }],
        );
        assert_eq!(penalty.score(1.0), -10.0);
        assert_eq!(penalty.score(2.0), -15.0);
    }

    #[test]
    fn toml_roundtrip() {
        let t = table();
        let text = toml::to_string(&t).unwrap();
        let back: ScoreTable = toml::from_str(&text).unwrap();
        assert_eq!(t, back);
    }
}
