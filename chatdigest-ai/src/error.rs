use crate::ProviderKind;

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("{0} returned no text")]
    EmptyResponse(&'static str),

    #[error("No API key configured for the {0} provider")]
    MissingApiKey(ProviderKind),
}

pub type AiResult<T> = Result<T, AiError>;
