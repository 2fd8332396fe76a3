use chatdigest_ai::{PromptType, Summarizer};
use chatdigest_common::{ChannelCollection, Message, Summary};
use indexmap::IndexMap;

use crate::collect::MessageCollector;
use crate::source::ChannelSource;

pub const COMBINED_CHANNEL_ID: &str = "combined";
pub const COMBINED_CHANNEL_NAME: &str = "All Channels";

/// Turns collected channels into [`Summary`] documents, retrying a failed
/// primary summarizer once on the fallback.
pub struct SummaryGenerator<Src, S> {
    collector: MessageCollector<Src>,
    primary: S,
    fallback: Option<S>,
}

impl<Src: ChannelSource, S: Summarizer> SummaryGenerator<Src, S> {
    pub fn new(collector: MessageCollector<Src>, primary: S, fallback: Option<S>) -> Self {
        Self {
            collector,
            primary,
            fallback,
        }
    }

    pub fn collector(&self) -> &MessageCollector<Src> {
        &self.collector
    }

    pub async fn generate_channel_summary(
        &self,
        channel_id: &str,
        window_days: u32,
        prompt_type: Option<PromptType>,
    ) -> Option<Summary> {
        let collection = self
            .collector
            .collector()
            .collect(channel_id, window_days)
            .await;

        self.summarize_collection(&collection, prompt_type).await
    }

    /// Summarize the main channel and each thread, then fold the thread
    /// results under a `## Thread Summaries` heading.
    pub async fn summarize_collection(
        &self,
        collection: &ChannelCollection,
        prompt_type: Option<PromptType>,
    ) -> Option<Summary> {
        let channel_id = &collection.channel_id;
        let channel_name = &collection.channel_name;

        if collection.is_empty() {
            tracing::info!(%channel_id, %channel_name, "no messages in window");
            return None;
        }

        let mut main_text = None;
        let mut provider = None;

        if !collection.messages.is_empty() {
            match self
                .summarize_with_fallback(&collection.messages, channel_name, prompt_type)
                .await
            {
                Some((text, answered_by)) => {
                    main_text = Some(text);
                    provider = Some(answered_by);
                }
                None => tracing::error!(%channel_id, %channel_name, "failed to summarize channel"),
            }
        }

        let mut thread_sections = Vec::new();
        for thread in &collection.threads {
            if thread.messages.is_empty() {
                continue;
            }

            let label = format!("{channel_name} > {}", thread.thread_name);
            match self
                .summarize_with_fallback(&thread.messages, &label, prompt_type)
                .await
            {
                Some((text, answered_by)) => {
                    provider = provider.or(Some(answered_by));
                    thread_sections.push((thread.thread_name.as_str(), text));
                }
                None => tracing::error!(
                    %channel_id,
                    thread_id = %thread.thread_id,
                    thread_name = %thread.thread_name,
                    "failed to summarize thread"
                ),
            }
        }

        let provider = provider?;
        let content = assemble(main_text, &thread_sections);

        tracing::info!(
            %channel_id,
            provider,
            threads = thread_sections.len(),
            "channel summary ready"
        );

        Some(Summary::new(
            content,
            channel_id.as_str(),
            channel_name.as_str(),
            collection.total_messages(),
            provider,
        ))
    }

    pub async fn generate_all_channel_summaries(
        &self,
        window_days: u32,
    ) -> IndexMap<String, Option<Summary>> {
        let collections = self.collector.collect_for_config(window_days).await;
        self.generate_all_from(&collections).await
    }

    pub async fn generate_all_from(
        &self,
        collections: &IndexMap<String, ChannelCollection>,
    ) -> IndexMap<String, Option<Summary>> {
        let cancel = self.collector.cancellation_token();
        let mut summaries = IndexMap::with_capacity(collections.len());

        for (channel_id, collection) in collections {
            if cancel.is_cancelled() {
                tracing::warn!("summary generation cancelled");
                break;
            }

            let summary = self.summarize_collection(collection, None).await;
            summaries.insert(channel_id.clone(), summary);
        }

        summaries
    }

    pub async fn generate_combined_summary(&self, window_days: u32) -> Option<Summary> {
        let collections = self.collector.collect_for_config(window_days).await;
        self.generate_combined_from(&collections).await
    }

    /// One summary over every channel and thread message, oldest first.
    /// `message_count` of the result counts thread messages too.
    pub async fn generate_combined_from(
        &self,
        collections: &IndexMap<String, ChannelCollection>,
    ) -> Option<Summary> {
        let mut messages: Vec<Message> = collections
            .values()
            .flat_map(|c| c.all_messages())
            .cloned()
            .collect();

        if messages.is_empty() {
            tracing::info!("no messages in any channel for the combined summary");
            return None;
        }

        messages.sort_by_key(|m| m.timestamp);

        let (text, provider) = self
            .summarize_with_fallback(&messages, COMBINED_CHANNEL_NAME, Some(PromptType::General))
            .await?;

        Some(Summary::new(
            text,
            COMBINED_CHANNEL_ID,
            COMBINED_CHANNEL_NAME,
            messages.len(),
            provider,
        ))
    }

    /// Text plus the name of the provider that produced it.
    async fn summarize_with_fallback(
        &self,
        messages: &[Message],
        label: &str,
        prompt_type: Option<PromptType>,
    ) -> Option<(String, &'static str)> {
        if let Some(text) = self
            .primary
            .generate_summary(messages, label, prompt_type)
            .await
        {
            return Some((text, self.primary.provider_name()));
        }

        let fallback = self.fallback.as_ref()?;

        tracing::warn!(
            channel = label,
            primary = self.primary.provider_name(),
            fallback = fallback.provider_name(),
            "primary summarizer failed, trying fallback"
        );

        let text = fallback.generate_summary(messages, label, prompt_type).await?;
        Some((text, fallback.provider_name()))
    }
}

fn assemble(main_text: Option<String>, thread_sections: &[(&str, String)]) -> String {
    let mut content = main_text.unwrap_or_default();

    if thread_sections.is_empty() {
        return content;
    }

    if content.is_empty() {
        content.push_str("## Thread Summaries\n");
    } else {
        content.push_str("\n\n## Thread Summaries\n");
    }

    for (thread_name, text) in thread_sections {
        content.push_str(&format!("\n### {thread_name}\n{text}\n"));
    }

    content
}
