// Diagnostic record of one model check.
//
// Emitted by the worker for every queued verdict and printed by the CLI
// (`batch --json` writes one record per line). Carries enough to explain a
// decision after the fact: what was scored, the score, the threshold in
// force at delivery and the outcome.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::scoring::{FilterVerdict, Score};

/// Characters of the title kept in a record.
const TITLE_PREVIEW_CHARS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckResult {
    Filtered,
    Allowed,
}

impl CheckResult {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckResult::Filtered => "filtered",
            CheckResult::Allowed => "allowed",
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckRecord {
    pub title_preview: String,
    pub score: Score,
    pub threshold: f32,
    pub result: CheckResult,
    pub scored_at: DateTime<Utc>,
}

impl CheckRecord {
    pub fn new(title: Option<&str>, verdict: &FilterVerdict, threshold: f32) -> Self {
        Self {
            title_preview: super::truncate_chars(title.unwrap_or_default(), TITLE_PREVIEW_CHARS),
            score: verdict.score,
            threshold,
            result: if verdict.should_filter {
                CheckResult::Filtered
            } else {
                CheckResult::Allowed
            },
            scored_at: Utc::now(),
        }
    }
}
