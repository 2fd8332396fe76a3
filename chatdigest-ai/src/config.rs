use crate::{ProviderKind, claude, deepseek};

/// Credentials for every supported provider.
///
/// Both sections are optional so that only the primary provider has to be
/// configured; the other one, when present, becomes the fallback.
#[derive(Clone, Default, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderKind,
    pub anthropic: Option<claude::Config>,
    pub deepseek: Option<deepseek::Config>,
}
