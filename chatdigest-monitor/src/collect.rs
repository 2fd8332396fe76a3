use chatdigest_common::ChannelCollection;
use indexmap::IndexMap;
use tokio_util::sync::CancellationToken;

use crate::Config;
use crate::collector::{Collector, CollectorConfig};
use crate::source::ChannelSource;

/// Decides which channels a run covers and collects them one after another.
pub struct MessageCollector<Src> {
    collector: Collector<Src>,
    channel_ids: Vec<String>,
    guild_id: Option<String>,
    cancel: CancellationToken,
}

impl<Src: ChannelSource> MessageCollector<Src> {
    pub fn new(
        collector: Collector<Src>,
        channel_ids: Vec<String>,
        guild_id: Option<String>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            collector,
            channel_ids,
            guild_id,
            cancel,
        }
    }

    pub fn from_config(source: Src, config: &Config, cancel: CancellationToken) -> Self {
        Self::new(
            Collector::new(source, CollectorConfig::from_config(config)),
            config.channel_ids.clone(),
            config.guild_id.clone(),
            cancel,
        )
    }

    pub fn collector(&self) -> &Collector<Src> {
        &self.collector
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Collect the configured channels, or every text channel of the guild.
    ///
    /// Configured channels are recorded even when empty; guild channels
    /// without messages are dropped.
    pub async fn collect_for_config(&self, window_days: u32) -> IndexMap<String, ChannelCollection> {
        let mut collections = IndexMap::new();

        if !self.channel_ids.is_empty() {
            for channel_id in &self.channel_ids {
                if self.cancel.is_cancelled() {
                    tracing::warn!("collection cancelled");
                    break;
                }

                let collection = self.collector.collect(channel_id, window_days).await;
                collections.insert(channel_id.clone(), collection);
            }
        } else if let Some(guild_id) = &self.guild_id {
            for collection in self.collect_for_guild(guild_id, window_days).await {
                if collection.is_empty() {
                    tracing::debug!(channel_id = %collection.channel_id, "dropping empty guild channel");
                    continue;
                }

                collections.insert(collection.channel_id.clone(), collection);
            }
        } else {
            tracing::warn!("neither channel ids nor a guild id configured, nothing to collect");
        }

        collections
    }

    pub async fn collect_for_guild(&self, guild_id: &str, window_days: u32) -> Vec<ChannelCollection> {
        let channels = self.collector.source().guild_channels(guild_id).await;
        let text_channels: Vec<_> = channels.into_iter().filter(|c| c.is_text()).collect();

        tracing::info!(%guild_id, count = text_channels.len(), "collecting guild text channels");

        let mut collections = Vec::with_capacity(text_channels.len());
        for channel in text_channels {
            if self.cancel.is_cancelled() {
                tracing::warn!(%guild_id, "guild collection cancelled");
                break;
            }

            let collection = self
                .collector
                .collect_named(&channel.id, channel.name, window_days)
                .await;
            collections.push(collection);
        }

        collections
    }
}
