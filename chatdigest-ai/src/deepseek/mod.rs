mod config;
mod models;

pub use config::Config;

use crate::deepseek::models::{ChatMessage, ChatRequest, ChatResponse};
use crate::{AiError, AiResult, Summarizer};

const MAX_INPUT_CHARS: usize = 12_000;

/// Client for the OpenAI-compatible DeepSeek chat completions endpoint.
pub struct DeepSeekSummarizer {
    client: reqwest::Client,
    config: Config,
}

impl DeepSeekSummarizer {
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

impl Summarizer for DeepSeekSummarizer {
    fn max_input_chars(&self) -> usize {
        MAX_INPUT_CHARS
    }

    async fn complete(&self, system: &str, user: &str) -> AiResult<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: self.config.max_tokens,
            stream: false,
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "DeepSeek API error");
            return Err(AiError::Api(format!("{status}: {body}")));
        }

        let response = response.json::<ChatResponse>().await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AiError::EmptyResponse(self.provider_name()))
    }
}
