mod backend;
pub mod claude;
mod config;
pub mod deepseek;
mod error;
mod format;
pub mod prompts;

pub use backend::{ProviderKind, SummarizerBackend};
pub use config::Config;
pub use error::*;
pub use format::{format_messages, truncate_to_suffix};
pub use prompts::{PromptTemplate, PromptType};

use chatdigest_common::Message;

/// Name of a summarizer type without its module path and `Summarizer` suffix.
pub fn provider_name_of<T: ?Sized>() -> &'static str {
    let name = std::any::type_name::<T>();
    let name = name.rsplit("::").next().unwrap_or(name);
    name.strip_suffix("Summarizer").unwrap_or(name)
}

pub trait Summarizer {
    fn provider_name(&self) -> &'static str {
        provider_name_of::<Self>()
    }

    /// Character budget for the formatted transcript.
    fn max_input_chars(&self) -> usize;

    /// One raw completion call against the backend.
    fn complete(&self, system: &str, user: &str) -> impl Future<Output = AiResult<String>>;

    /// Summarize `messages` under `channel_label`.
    ///
    /// Never fails: backend errors and blank answers are logged and come back
    /// as `None` so the caller can try another provider.
    fn generate_summary(
        &self,
        messages: &[Message],
        channel_label: &str,
        prompt_type: Option<PromptType>,
    ) -> impl Future<Output = Option<String>> {
        async move {
            let provider = self.provider_name();

            if messages.is_empty() {
                tracing::warn!(provider, channel = channel_label, "no messages to summarize");
                return None;
            }

            let formatted = format_messages(messages);
            let transcript = truncate_to_suffix(&formatted, self.max_input_chars());

            let template = PromptTemplate::select(channel_label, prompt_type);
            let user_prompt = template.render(transcript, channel_label);

            tracing::info!(
                provider,
                channel = channel_label,
                count = messages.len(),
                "generating summary"
            );

            match self.complete(template.system, &user_prompt).await {
                Ok(text) if !text.trim().is_empty() => {
                    tracing::info!(provider, channel = channel_label, "summary generated");
                    Some(text)
                }
                Ok(_) => {
                    tracing::warn!(provider, channel = channel_label, "summarizer returned blank text");
                    None
                }
                Err(error) => {
                    tracing::error!(%error, provider, channel = channel_label, "summarizer failed");
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
