#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl BotError {
    /// Client errors other than 429 fail the same way on every attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            BotError::Request(_) | BotError::Timeout(_) => true,
            BotError::Api { status, .. } => {
                *status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
        }
    }
}

pub type BotResult<T> = Result<T, BotError>;
