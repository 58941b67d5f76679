// Chat-completion request construction.
//
// Pure functions only: endpoint normalization, character-safe truncation,
// prompt fallback and the serde envelope. The transport serializes the
// resulting ChatRequest as-is.

use serde::Serialize;

use super::traits::ApiConfig;

/// Sub-path appended to the configured endpoint when it is missing.
pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Maximum characters of a notification title sent to the model.
pub const MAX_TITLE_CHARS: usize = 50;

/// Maximum characters of a notification body sent to the model.
pub const MAX_CONTENT_CHARS: usize = 200;

/// Strip trailing slashes and make sure the URL ends with `/chat/completions`.
pub fn normalize_endpoint(url: &str) -> String {
    let base = url.trim_end_matches('/');
    if base.ends_with(CHAT_COMPLETIONS_PATH) {
        base.to_string()
    } else {
        format!("{base}{CHAT_COMPLETIONS_PATH}")
    }
}

/// First `max_chars` characters of `text`, or all of it when shorter.
///
/// Counts `char`s rather than bytes, so multi-byte text is never split.
pub fn take_chars(text: Option<&str>, max_chars: usize) -> String {
    let text = text.unwrap_or_default();
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// The configured prompt, or the locale default when it is empty.
pub fn resolve_system_prompt(config: &ApiConfig) -> &str {
    if config.system_prompt.is_empty() {
        config.locale.default_prompt()
    } else {
        &config.system_prompt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Body of `POST {endpoint}/chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// Build the two-message conversation for one notification.
pub fn build_request(title: Option<&str>, content: Option<&str>, config: &ApiConfig) -> ChatRequest {
    let title = take_chars(title, MAX_TITLE_CHARS);
    let content = take_chars(content, MAX_CONTENT_CHARS);

    ChatRequest {
        model: config.model_name.clone(),
        messages: vec![
            ChatMessage {
                role: Role::System,
                content: resolve_system_prompt(config).to_string(),
            },
            ChatMessage {
                role: Role::User,
                content: config.locale.user_message(&title, &content),
            },
        ],
        temperature: config.temperature,
    }
}
