// Localized text resources used to render a scoring request.
//
// The model sees the system prompt and a short user message; both are
// locale-specific. Scores are read back as plain numbers, so the reply
// contract does not depend on the locale.

use std::fmt;
use std::str::FromStr;

/// Language of the prompt text sent to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Zh,
    En,
}

const DEFAULT_PROMPT_ZH: &str = "你是一个通知过滤助手。请根据通知的标题和内容评估这条通知对用户的价值，\
给出0到10之间的分数：0表示广告、营销或无意义的打扰，10表示重要且需要立即查看的消息。\
只输出一个数字，不要输出任何其他内容。";

const DEFAULT_PROMPT_EN: &str = "You are a notification filtering assistant. Rate how valuable \
this notification is to the user based on its title and content, on a scale from 0 to 10: \
0 means advertising, marketing or meaningless noise, 10 means important and worth reading \
right away. Reply with a single number and nothing else.";

impl Locale {
    /// System prompt used when the configured prompt is empty.
    pub fn default_prompt(self) -> &'static str {
        match self {
            Locale::Zh => DEFAULT_PROMPT_ZH,
            Locale::En => DEFAULT_PROMPT_EN,
        }
    }

    /// Render the user message carrying the (already truncated) notification.
    pub fn user_message(self, title: &str, content: &str) -> String {
        match self {
            Locale::Zh => format!("标题：{title}\n内容：{content}"),
            Locale::En => format!("Title: {title}\nContent: {content}"),
        }
    }

    /// Fixed (title, content) pair sent by connection tests.
    pub fn probe_text(self) -> (&'static str, &'static str) {
        match self {
            Locale::Zh => ("测试标题", "测试内容"),
            Locale::En => ("test title", "test content"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" | "zh_cn" | "cn" => Ok(Locale::Zh),
            "en" | "en-us" | "en_us" => Ok(Locale::En),
            other => anyhow::bail!("unsupported locale {other:?} (expected \"zh\" or \"en\")"),
        }
    }
}
