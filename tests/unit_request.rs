// Unit tests for chat-completion request construction.
//
// Tests endpoint normalization, character-safe truncation of title and
// content, absent-field handling, prompt fallback and the JSON envelope,
// all without network access.

use notiscore::scoring::request::{
    build_request, normalize_endpoint, take_chars, Role, MAX_CONTENT_CHARS, MAX_TITLE_CHARS,
};
use notiscore::scoring::{ApiConfig, Locale};
use serde_json::json;

fn config() -> ApiConfig {
    ApiConfig::new("https://api.example.com/v1", "sk-test", "test-model")
}

// ============================================================
// normalize_endpoint
// ============================================================

#[test]
fn endpoint_gets_chat_completions_appended() {
    assert_eq!(
        normalize_endpoint("https://api.example.com/v1"),
        "https://api.example.com/v1/chat/completions"
    );
}

#[test]
fn endpoint_trailing_slashes_are_stripped() {
    assert_eq!(
        normalize_endpoint("https://api.example.com/v1///"),
        "https://api.example.com/v1/chat/completions"
    );
}

#[test]
fn endpoint_already_complete_is_unchanged() {
    assert_eq!(
        normalize_endpoint("https://api.example.com/v1/chat/completions"),
        "https://api.example.com/v1/chat/completions"
    );
}

#[test]
fn endpoint_complete_with_trailing_slash() {
    assert_eq!(
        normalize_endpoint("https://api.example.com/v1/chat/completions/"),
        "https://api.example.com/v1/chat/completions"
    );
}

// ============================================================
// Truncation
// ============================================================

#[test]
fn long_title_keeps_exactly_fifty_chars() {
    let title = "t".repeat(80);
    let truncated = take_chars(Some(&title), MAX_TITLE_CHARS);
    assert_eq!(truncated.chars().count(), 50);
    assert_eq!(truncated, "t".repeat(50));
}

#[test]
fn long_content_keeps_exactly_two_hundred_chars() {
    let content: String = (0..300).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
    let truncated = take_chars(Some(&content), MAX_CONTENT_CHARS);
    assert_eq!(truncated.chars().count(), 200);
    assert!(content.starts_with(&truncated));
}

#[test]
fn truncation_counts_chars_not_bytes() {
    // 60 three-byte characters: byte slicing at 50 would split one
    let title = "通".repeat(60);
    let truncated = take_chars(Some(&title), MAX_TITLE_CHARS);
    assert_eq!(truncated, "通".repeat(50));
}

#[test]
fn truncation_of_emoji_is_utf8_safe() {
    let content = "🔥".repeat(250);
    let truncated = take_chars(Some(&content), MAX_CONTENT_CHARS);
    assert_eq!(truncated.chars().count(), 200);
}

#[test]
fn short_input_passes_through() {
    assert_eq!(take_chars(Some("Hello"), MAX_TITLE_CHARS), "Hello");
}

// ============================================================
// build_request
// ============================================================

#[test]
fn request_has_system_then_user_message() {
    let request = build_request(Some("Title"), Some("Body"), &config());
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, Role::System);
    assert_eq!(request.messages[1].role, Role::User);
    assert_eq!(request.messages[1].content, "标题：Title\n内容：Body");
}

#[test]
fn request_user_message_english_locale() {
    let request = build_request(Some("Title"), Some("Body"), &config().with_locale(Locale::En));
    assert_eq!(request.messages[1].content, "Title: Title\nContent: Body");
}

#[test]
fn request_absent_title_and_content_are_empty() {
    let request = build_request(None, None, &config());
    assert_eq!(request.messages[1].content, "标题：\n内容：");
}

#[test]
fn request_truncates_before_embedding() {
    let title = "x".repeat(51);
    let content = "y".repeat(201);
    let request = build_request(Some(&title), Some(&content), &config());
    let expected = format!("标题：{}\n内容：{}", "x".repeat(50), "y".repeat(200));
    assert_eq!(request.messages[1].content, expected);
}

#[test]
fn empty_prompt_falls_back_to_locale_default() {
    let request = build_request(Some("a"), Some("b"), &config());
    assert_eq!(request.messages[0].content, Locale::Zh.default_prompt());

    let request = build_request(Some("a"), Some("b"), &config().with_locale(Locale::En));
    assert_eq!(request.messages[0].content, Locale::En.default_prompt());
}

#[test]
fn custom_prompt_is_used_verbatim() {
    let request = build_request(
        Some("a"),
        Some("b"),
        &config().with_system_prompt("Rate it 0-10."),
    );
    assert_eq!(request.messages[0].content, "Rate it 0-10.");
}

#[test]
fn envelope_serializes_to_openai_schema() {
    let request = build_request(
        Some("T"),
        Some("C"),
        &config().with_system_prompt("P").with_temperature(0.25),
    );
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(
        value,
        json!({
            "model": "test-model",
            "messages": [
                {"role": "system", "content": "P"},
                {"role": "user", "content": "标题：T\n内容：C"}
            ],
            "temperature": 0.25
        })
    );
}
