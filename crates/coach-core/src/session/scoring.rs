//! Running score statistics for mock interviews.

use serde::{Deserialize, Serialize};

/// Accumulates per-turn scores and derives a running average.
///
/// The aggregator makes no assumption about the score range; it only sums
/// and counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBoard {
    /// Sum of every recorded score.
    pub score_total: f64,
    /// Number of recorded scores.
    pub scored_turn_count: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one score. Non-finite values are ignored.
    pub fn record(&mut self, score: f64) {
        if !score.is_finite() {
            tracing::warn!("[ScoreBoard] Ignoring non-finite score: {}", score);
            return;
        }
        self.score_total += score;
        self.scored_turn_count += 1;
    }

    /// Average score, or 0 when nothing has been scored yet.
    pub fn average(&self) -> f64 {
        if self.scored_turn_count == 0 {
            0.0
        } else {
            self.score_total / f64::from(self.scored_turn_count)
        }
    }

    /// Average rounded to the nearest integer, as shown to the user.
    pub fn display_average(&self) -> i64 {
        self.average().round() as i64
    }

    pub fn reset(&mut self) {
        self.score_total = 0.0;
        self.scored_turn_count = 0;
    }
}
