mod config;
pub mod embed;
mod error;
mod rate_limit;

use std::time::Duration;

use chatdigest_common::Summary;
pub use config::Config;
pub use error::*;
use reqwest::header::AUTHORIZATION;

use crate::embed::Embed;
use crate::rate_limit::{PostRateLimiter, post_limiter};

/// Destination for finished digests.
///
/// Both operations report success as a plain `bool`; failures are logged by
/// the implementation.
pub trait SummaryPoster {
    fn post_summary(&self, channel_id: &str, summary: &Summary) -> impl Future<Output = bool>;

    fn post_error(
        &self,
        channel_id: &str,
        message: &str,
        title: Option<&str>,
    ) -> impl Future<Output = bool>;
}

#[derive(Debug, Clone)]
pub struct PostSettings {
    pub timeout: Duration,
    pub attempts: u32,
    pub initial_backoff: Duration,
    pub min_interval: Duration,
}

impl Default for PostSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            attempts: 3,
            initial_backoff: Duration::from_secs(1),
            min_interval: Duration::from_secs(1),
        }
    }
}

/// Posts embeds to Discord channels through the bot REST API.
pub struct DiscordWriter {
    client: reqwest::Client,
    base_url: String,
    token: String,
    settings: PostSettings,
    limiter: PostRateLimiter,
}

impl DiscordWriter {
    pub fn new(config: &Config) -> Self {
        Self::with_settings(config, PostSettings::default())
    }

    pub fn with_settings(config: &Config, settings: PostSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            limiter: post_limiter(settings.min_interval),
            settings,
        }
    }

    /// Send one message, retrying transient failures with exponential backoff.
    pub async fn send_embeds(&self, channel_id: &str, embeds: &[Embed]) -> BotResult<()> {
        let retries = self.settings.attempts.saturating_sub(1) as usize;
        let retrier = retrier::RetryPolicy::exponential(self.settings.initial_backoff)
            .with_max_retries(retries);

        retrier
            .retry_if(
                || self.send_once(channel_id, embeds),
                |error: &BotError| {
                    let retryable = error.is_retryable();
                    if retryable {
                        tracing::warn!(%error, %channel_id, "post failed, retrying");
                    }
                    retryable
                },
            )
            .await
    }

    async fn send_once(&self, channel_id: &str, embeds: &[Embed]) -> BotResult<()> {
        self.limiter.until_ready().await;

        let url = format!("{}/channels/{channel_id}/messages", self.base_url);
        let request = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("Bot {}", self.token))
            .json(&serde_json::json!({ "embeds": embeds }));

        let response = tokio::time::timeout(self.settings.timeout, request.send())
            .await
            .map_err(|_| BotError::Timeout(self.settings.timeout))??;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::Api { status, body });
        }

        Ok(())
    }
}

impl SummaryPoster for DiscordWriter {
    async fn post_summary(&self, channel_id: &str, summary: &Summary) -> bool {
        let messages = embed::summary_messages(summary);
        let parts = messages.len();

        for (idx, embeds) in messages.iter().enumerate() {
            if let Err(error) = self.send_embeds(channel_id, embeds).await {
                tracing::error!(
                    %error,
                    %channel_id,
                    title = %summary.title,
                    part = idx + 1,
                    parts,
                    "failed to post summary"
                );
                return false;
            }
        }

        tracing::info!(%channel_id, title = %summary.title, parts, "posted summary");
        true
    }

    async fn post_error(&self, channel_id: &str, message: &str, title: Option<&str>) -> bool {
        let embed = embed::error_embed(message, title, chrono::Utc::now());

        match self.send_embeds(channel_id, std::slice::from_ref(&embed)).await {
            Ok(()) => {
                tracing::info!(%channel_id, "posted error message");
                true
            }
            Err(error) => {
                tracing::error!(%error, %channel_id, "failed to post error message");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests;
