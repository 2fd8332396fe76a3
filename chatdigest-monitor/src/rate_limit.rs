use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;

const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

const DEFAULT_REMAINING: i64 = 5;
const DEFAULT_RESET_SECS: i64 = 5;
const SAFETY_MARGIN: Duration = Duration::from_millis(500);

/// Rate-limit bucket as last reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitState {
    pub remaining: i64,
    pub reset_at: DateTime<Utc>,
}

impl RateLimitState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            remaining: DEFAULT_REMAINING,
            reset_at: now + chrono::Duration::seconds(DEFAULT_RESET_SECS),
        }
    }

    /// How long to wait before the next request, if the bucket is nearly drained.
    pub fn before_request(&self, now: DateTime<Utc>) -> Option<Duration> {
        if self.remaining > 1 {
            return None;
        }

        let until_reset = (self.reset_at - now).to_std().unwrap_or(Duration::ZERO);
        Some(until_reset + SAFETY_MARGIN)
    }

    /// Absent or unparsable headers reset to the defaults.
    pub fn after_response(&mut self, headers: &HeaderMap, now: DateTime<Utc>) {
        self.remaining = header_str(headers, REMAINING_HEADER)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(DEFAULT_REMAINING);

        self.reset_at = header_str(headers, RESET_HEADER)
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|secs| secs.is_finite())
            .and_then(|secs| DateTime::from_timestamp_millis((secs * 1000.0) as i64))
            .unwrap_or_else(|| now + chrono::Duration::seconds(DEFAULT_RESET_SECS));
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::trim)
}
