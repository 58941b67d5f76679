// Severity scorer trait and the value types that cross it.
//
// A scorer turns one (title, content) pair plus a per-call ApiConfig into a
// bounded Score. The production implementation is OpenAiScorer; tests swap
// in fakes with injected latency.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use super::error::ScoringError;
use super::locale::Locale;

/// Temperature used when nothing else is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Everything needed to address the remote model for one call.
///
/// Built fresh from the preferences store every time a call executes, so a
/// settings change takes effect on the next call that starts.
#[derive(Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL or full chat-completions URL of the endpoint
    pub endpoint_url: String,
    /// Bearer token sent in the Authorization header
    pub api_key: String,
    pub model_name: String,
    /// System prompt; empty means the locale's default prompt
    pub system_prompt: String,
    pub temperature: f32,
    /// Language of the prompt and user-message template
    pub locale: Locale,
}

impl ApiConfig {
    pub fn new(
        endpoint_url: impl Into<String>,
        api_key: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            api_key: api_key.into(),
            model_name: model_name.into(),
            system_prompt: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            locale: Locale::default(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

// The key must never end up in logs.
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("api_key", &mask_key(&self.api_key))
            .field("model_name", &self.model_name)
            .field("system_prompt_len", &self.system_prompt.chars().count())
            .field("temperature", &self.temperature)
            .field("locale", &self.locale)
            .finish()
    }
}

/// Show only the last four characters of a secret.
pub fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count == 0 {
        return "(not set)".to_string();
    }
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("****{tail}")
}

/// A severity score in `[0.0, 10.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Score(f32);

impl Score {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 10.0;

    /// Substituted for any failed call. Only a threshold of 10.0 filters it.
    pub const SENTINEL: Score = Score(10.0);

    /// Clamp a raw model value into range.
    pub fn clamped(raw: f32) -> Self {
        Score(raw.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn is_in_range(self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }

    /// Collapse a failed call to the sentinel, logging why.
    ///
    /// This is the only place a `ScoringError` is discarded on the scoring
    /// paths; everything below it keeps the typed error.
    pub fn or_sentinel(result: Result<Score, ScoringError>) -> Score {
        match result {
            Ok(score) => score,
            Err(e) => {
                warn!(error = %e, sentinel = Self::SENTINEL.0, "Scoring call failed, using sentinel");
                Self::SENTINEL
            }
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Trait for scoring notification severity. Implementations are async
/// because the real one makes an HTTP call.
#[async_trait]
pub trait SeverityScorer: Send + Sync {
    /// Score one notification. Absent title or content count as empty.
    async fn score(
        &self,
        title: Option<&str>,
        content: Option<&str>,
        config: &ApiConfig,
    ) -> Result<Score, ScoringError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_in_range_values_exact() {
        assert_eq!(Score::clamped(7.25).value(), 7.25);
        assert_eq!(Score::clamped(0.0).value(), 0.0);
        assert_eq!(Score::clamped(10.0).value(), 10.0);
    }

    #[test]
    fn clamp_pins_out_of_range_values() {
        assert_eq!(Score::clamped(15.0).value(), 10.0);
        assert_eq!(Score::clamped(f32::INFINITY).value(), 10.0);
        assert_eq!(Score::clamped(-3.0).value(), 0.0);
    }

    #[test]
    fn or_sentinel_passes_success_through() {
        let score = Score::or_sentinel(Ok(Score::clamped(2.5)));
        assert_eq!(score.value(), 2.5);
    }

    #[test]
    fn or_sentinel_maps_errors_to_ten() {
        let score = Score::or_sentinel(Err(ScoringError::NoChoices));
        assert_eq!(score, Score::SENTINEL);
        assert_eq!(score.value(), 10.0);
    }

    #[test]
    fn debug_output_masks_api_key() {
        let config = ApiConfig::new("https://api.example.com/v1", "sk-secret-abcd", "m");
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("****abcd"));
    }

    #[test]
    fn mask_key_handles_short_and_empty_keys() {
        assert_eq!(mask_key(""), "(not set)");
        assert_eq!(mask_key("abc"), "****");
        assert_eq!(mask_key("sk-123456"), "****3456");
    }
}
