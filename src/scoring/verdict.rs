// Suppress/allow decision from a score and the filtering degree.

use serde::Serialize;

use super::traits::Score;

/// Whether a notification should be filtered, and the score behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterVerdict {
    pub should_filter: bool,
    pub score: Score,
}

impl FilterVerdict {
    pub fn new(score: Score, threshold: f32) -> Self {
        Self {
            should_filter: evaluate(score.value(), threshold),
            score,
        }
    }
}

/// Low scores are filtered: `score <= threshold`, boundary inclusive.
pub fn evaluate(score: f32, threshold: f32) -> bool {
    score <= threshold
}
