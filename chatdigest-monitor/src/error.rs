#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Still rate limited after {0} retries")]
    RateLimited(u32),

    #[error("Failed to decode response body: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type MonitorResult<T> = Result<T, MonitorError>;
