use std::time::Duration;

use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::rate_limit::RateLimitState;
use crate::{Config, MonitorError, MonitorResult};

const DEFAULT_RETRY_AFTER: f64 = 1.0;
const MAX_RETRY_AFTER: f64 = 600.0;

/// HTTP client for the source API that honours its rate-limit headers.
///
/// The bucket state is held for the whole request, so calls made through one
/// fetcher never overlap.
pub struct Fetcher {
    client: reqwest::Client,
    base_url: String,
    token: String,
    user_agent: String,
    max_rate_limit_retries: u32,
    state: Mutex<RateLimitState>,
}

impl Fetcher {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            user_agent: config.user_agent.clone(),
            max_rate_limit_retries: config.max_rate_limit_retries,
            state: Mutex::new(RateLimitState::new(Utc::now())),
        }
    }

    pub async fn get(&self, endpoint: &str) -> MonitorResult<Value> {
        self.request(endpoint, Method::GET, None).await
    }

    pub async fn request(
        &self,
        endpoint: &str,
        method: Method,
        payload: Option<&Value>,
    ) -> MonitorResult<Value> {
        let url = format!("{}{endpoint}", self.base_url);
        let mut state = self.state.lock().await;
        let mut retries = 0;

        loop {
            if let Some(wait) = state.before_request(Utc::now()) {
                tracing::debug!(?wait, endpoint, "rate limit bucket nearly drained, waiting");
                tokio::time::sleep(wait).await;
            }

            let mut request = self
                .client
                .request(method.clone(), &url)
                .header(AUTHORIZATION, &self.token)
                .header(CONTENT_TYPE, "application/json")
                .header(USER_AGENT, &self.user_agent);

            if let Some(payload) = payload {
                request = request.json(payload);
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(error) => {
                    tracing::error!(%error, endpoint, "request failed");
                    return Err(error.into());
                }
            };

            state.after_response(response.headers(), Utc::now());

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let body = response.text().await.unwrap_or_default();
                let retry_after = retry_after(&body);

                if retries >= self.max_rate_limit_retries {
                    tracing::error!(endpoint, retries, "rate limit retries exhausted");
                    return Err(MonitorError::RateLimited(retries));
                }

                retries += 1;
                tracing::warn!(endpoint, retry_after, attempt = retries, "rate limited, retrying");
                tokio::time::sleep(Duration::from_secs_f64(retry_after)).await;
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                tracing::error!(%status, %body, endpoint, "source API error");
                return Err(MonitorError::Status { status, body });
            }

            let bytes = response.bytes().await?;
            if bytes.is_empty() {
                return Ok(Value::Null);
            }

            return serde_json::from_slice(&bytes).map_err(|error| {
                tracing::error!(%error, endpoint, "undecodable response body");
                MonitorError::Decode(error.to_string())
            });
        }
    }
}

/// Seconds to wait from a 429 body, `{"retry_after": 1.5, ...}`.
fn retry_after(body: &str) -> f64 {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("retry_after").and_then(Value::as_f64))
        .filter(|secs| secs.is_finite())
        .unwrap_or(DEFAULT_RETRY_AFTER)
        .clamp(0.0, MAX_RETRY_AFTER)
}
