// Severity scoring: one chat-completion round trip per notification.
//
// The SeverityScorer trait is the seam between the queue and the network.
// OpenAiScorer implements it against any OpenAI-compatible endpoint, and
// ScoringClient funnels asynchronous submissions through a single worker so
// that at most one queued request is in flight per client.

pub mod client;
pub mod error;
pub mod locale;
pub mod openai;
pub mod queue;
pub mod request;
pub mod response;
pub mod traits;
pub mod verdict;

pub use client::ScoringClient;
pub use error::ScoringError;
pub use locale::Locale;
pub use openai::OpenAiScorer;
pub use traits::{ApiConfig, Score, SeverityScorer};
pub use verdict::FilterVerdict;
