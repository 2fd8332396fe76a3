use std::fmt;

use crate::claude::AnthropicSummarizer;
use crate::deepseek::DeepSeekSummarizer;
use crate::{AiError, AiResult, Config, Summarizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Anthropic,
    DeepSeek,
}

impl ProviderKind {
    /// The provider to fall back to when this one fails.
    pub fn other(self) -> Self {
        match self {
            ProviderKind::Anthropic => ProviderKind::DeepSeek,
            ProviderKind::DeepSeek => ProviderKind::Anthropic,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Anthropic => f.write_str("anthropic"),
            ProviderKind::DeepSeek => f.write_str("deepseek"),
        }
    }
}

pub enum SummarizerBackend {
    Anthropic(AnthropicSummarizer),
    DeepSeek(DeepSeekSummarizer),
}

impl SummarizerBackend {
    pub fn new(kind: ProviderKind, config: &Config) -> AiResult<Self> {
        match kind {
            ProviderKind::Anthropic => config
                .anthropic
                .as_ref()
                .filter(|c| !c.api_key.trim().is_empty())
                .map(|c| Self::Anthropic(AnthropicSummarizer::new(c)))
                .ok_or(AiError::MissingApiKey(kind)),
            ProviderKind::DeepSeek => config
                .deepseek
                .as_ref()
                .filter(|c| !c.api_key.trim().is_empty())
                .map(|c| Self::DeepSeek(DeepSeekSummarizer::new(c)))
                .ok_or(AiError::MissingApiKey(kind)),
        }
    }

    /// Build the configured provider plus the other one when it has credentials.
    pub fn primary_and_fallback(config: &Config) -> AiResult<(Self, Option<Self>)> {
        let primary = Self::new(config.provider, config)?;

        let fallback_kind = config.provider.other();
        let fallback = match Self::new(fallback_kind, config) {
            Ok(backend) => Some(backend),
            Err(error) => {
                tracing::warn!(%error, provider = %fallback_kind, "fallback summarizer unavailable");
                None
            }
        };

        Ok((primary, fallback))
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            SummarizerBackend::Anthropic(_) => ProviderKind::Anthropic,
            SummarizerBackend::DeepSeek(_) => ProviderKind::DeepSeek,
        }
    }
}

impl Summarizer for SummarizerBackend {
    fn provider_name(&self) -> &'static str {
        match self {
            SummarizerBackend::Anthropic(inner) => inner.provider_name(),
            SummarizerBackend::DeepSeek(inner) => inner.provider_name(),
        }
    }

    fn max_input_chars(&self) -> usize {
        match self {
            SummarizerBackend::Anthropic(inner) => inner.max_input_chars(),
            SummarizerBackend::DeepSeek(inner) => inner.max_input_chars(),
        }
    }

    async fn complete(&self, system: &str, user: &str) -> AiResult<String> {
        match self {
            SummarizerBackend::Anthropic(inner) => inner.complete(system, user).await,
            SummarizerBackend::DeepSeek(inner) => inner.complete(system, user).await,
        }
    }
}
