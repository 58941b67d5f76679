// OpenAI-compatible chat-completion scorer.
//
// Works against any endpoint that speaks the `/chat/completions` schema
// (OpenAI, DeepSeek, Hunyuan, local gateways). One POST per call, reqwest's
// default timeouts, no retries: the caller owns any retry policy.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::error::ScoringError;
use super::request::{build_request, normalize_endpoint};
use super::response::score_from_body;
use super::traits::{ApiConfig, Score, SeverityScorer};

/// Scores notifications through a remote chat model.
pub struct OpenAiScorer {
    client: Client,
}

impl OpenAiScorer {
    /// Create a scorer with its own connection pool.
    pub fn new() -> Result<Self, ScoringError> {
        let client = Client::builder()
            .user_agent(concat!("notiscore/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Reuse an existing reqwest client (shared pool, custom TLS, proxies).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SeverityScorer for OpenAiScorer {
    async fn score(
        &self,
        title: Option<&str>,
        content: Option<&str>,
        config: &ApiConfig,
    ) -> Result<Score, ScoringError> {
        let url = normalize_endpoint(&config.endpoint_url);
        let request = build_request(title, content, config);

        debug!(url = %url, model = %config.model_name, "Sending scoring request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoringError::Status { status, body });
        }

        let body = response.text().await?;
        let score = score_from_body(&body)?;

        debug!(score = score.value(), "Scored notification");

        Ok(score)
    }
}
