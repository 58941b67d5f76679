// Failure reasons for a single scoring call.
//
// None of these reach a caller of the queued or direct scoring paths: the
// boundary collapses every variant to the sentinel score. They stay typed so
// logs and tests can tell a dead endpoint from a chatty model.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    /// Connection, DNS, TLS or body read failure.
    #[error("request to scoring endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("scoring endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The reply body was not a chat-completion JSON document.
    #[error("failed to parse scoring response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// `choices` was empty or absent.
    #[error("scoring response contained no choices")]
    NoChoices,

    /// The first choice had no digits or dots left after stripping.
    #[error("no numeric score in model reply {reply:?}")]
    NoScore { reply: String },

    /// Digits and dots were found but do not form a number (e.g. "1.2.3").
    #[error("model reply yielded unparseable number {digits:?}")]
    InvalidNumber { digits: String },

    /// The scorer panicked mid-call.
    #[error("scorer panicked while scoring")]
    Panicked,

    /// The client's worker task is gone, so a queued job was never run.
    #[error("scoring worker has stopped")]
    WorkerStopped,
}
