// Chat-completion response parsing and score extraction.
//
// Extraction is deliberately naive: every digit and dot in the trimmed reply
// is concatenated in order, then parsed. "Score: 7.5/10" becomes "7.510".
// The model is prompted to reply with a bare number, so this only matters
// when it doesn't.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::error::ScoringError;
use super::traits::Score;

static NON_NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9.]").unwrap());

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Usually a string. Some gateways send `null` on refusals, and some
    /// send a bare JSON number.
    pub content: Option<Value>,
}

impl ResponseMessage {
    /// Content as text: strings as-is, `null` as empty, anything else in
    /// its JSON form.
    pub fn text(&self) -> String {
        match &self.content {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Drop every character that is not an ASCII digit or `.`.
pub fn extract_numeric(reply: &str) -> String {
    NON_NUMERIC.replace_all(reply.trim(), "").into_owned()
}

/// Parse a model reply into a clamped score.
pub fn parse_score(reply: &str) -> Result<Score, ScoringError> {
    let digits = extract_numeric(reply);
    if digits.is_empty() {
        return Err(ScoringError::NoScore {
            reply: reply.to_string(),
        });
    }

    let raw: f32 = digits
        .parse()
        .map_err(|_| ScoringError::InvalidNumber { digits })?;
    Ok(Score::clamped(raw))
}

/// Parse a full response body and score its first choice.
pub fn score_from_body(body: &str) -> Result<Score, ScoringError> {
    let response: ChatResponse = serde_json::from_str(body)?;
    let choice = response.choices.first().ok_or(ScoringError::NoChoices)?;
    parse_score(&choice.message.text())
}
