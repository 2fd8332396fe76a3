mod config;
mod models;

pub use config::Config;

use crate::claude::models::{ClaudeMessage, ClaudeRequest, ClaudeResponse};
use crate::{AiError, AiResult, Summarizer};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_INPUT_CHARS: usize = 25_000;

pub struct AnthropicSummarizer {
    client: reqwest::Client,
    config: Config,
}

impl AnthropicSummarizer {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            config: config.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

impl Summarizer for AnthropicSummarizer {
    fn max_input_chars(&self) -> usize {
        MAX_INPUT_CHARS
    }

    async fn complete(&self, system: &str, user: &str) -> AiResult<String> {
        let request = ClaudeRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system,
            messages: vec![ClaudeMessage {
                role: "user",
                content: user,
            }],
        };

        let url = format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        // Check status before parsing
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "Anthropic API error");
            return Err(AiError::Api(format!("{status}: {body}")));
        }

        let response = response.json::<ClaudeResponse>().await?;

        if let Some(error) = response.error {
            return Err(AiError::Api(error.message));
        }

        response
            .content
            .into_iter()
            .filter(|block| block.kind.is_empty() || block.kind == "text")
            .find_map(|block| block.text)
            .ok_or(AiError::EmptyResponse(self.provider_name()))
    }
}
