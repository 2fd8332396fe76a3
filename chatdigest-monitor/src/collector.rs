use std::collections::HashSet;
use std::time::Duration;

use chatdigest_common::normalize::{normalize, record_timestamp};
use chatdigest_common::{ChannelCollection, Message, ThreadCollection};
use chrono::NaiveDateTime;
use serde_json::Value;

use crate::Config;
use crate::source::ChannelSource;

#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Page requests allowed per channel or thread.
    pub max_requests: usize,
    pub page_size: u32,
    pub page_delay: Duration,
    /// Upper bound of the random delay added to `page_delay`.
    pub page_jitter: Duration,
    pub thread_ids: HashSet<String>,
}

impl CollectorConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_requests: config.max_requests,
            page_size: config.page_size,
            thread_ids: config.thread_ids.iter().cloned().collect(),
            ..Default::default()
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_requests: 500,
            page_size: 100,
            page_delay: Duration::from_millis(500),
            page_jitter: Duration::from_secs(1),
            thread_ids: HashSet::new(),
        }
    }
}

/// Pages one channel (and its configured threads) back to a time threshold.
pub struct Collector<Src> {
    source: Src,
    config: CollectorConfig,
}

impl<Src: ChannelSource> Collector<Src> {
    pub fn new(source: Src, config: CollectorConfig) -> Self {
        Self { source, config }
    }

    pub fn source(&self) -> &Src {
        &self.source
    }

    pub async fn collect(&self, channel_id: &str, window_days: u32) -> ChannelCollection {
        let name = self
            .source
            .channel_info(channel_id)
            .await
            .and_then(|info| info.name);

        self.collect_named(channel_id, name, window_days).await
    }

    /// Like [`Collector::collect`] when the channel name is already known.
    pub async fn collect_named(
        &self,
        channel_id: &str,
        channel_name: Option<String>,
        window_days: u32,
    ) -> ChannelCollection {
        let channel_name = channel_name.unwrap_or_else(|| format!("Channel {channel_id}"));
        let threshold = window_threshold(window_days);

        tracing::info!(%channel_id, %channel_name, %threshold, "collecting channel");

        let mut collection = ChannelCollection::new(channel_id, channel_name);
        collection.messages = self.collect_pages(channel_id, threshold).await;

        if !self.config.thread_ids.is_empty() {
            collection.threads = self.collect_threads(channel_id, threshold).await;
        }

        tracing::info!(
            %channel_id,
            messages = collection.messages.len(),
            threads = collection.threads.len(),
            total = collection.total_messages(),
            "channel collected"
        );

        collection
    }

    async fn collect_threads(
        &self,
        channel_id: &str,
        threshold: NaiveDateTime,
    ) -> Vec<ThreadCollection> {
        let mut threads = Vec::new();

        for thread in self.source.active_threads(channel_id).await {
            if !self.config.thread_ids.contains(&thread.id) {
                continue;
            }

            let thread_name = thread
                .name
                .unwrap_or_else(|| format!("Thread {}", thread.id));

            tracing::info!(%channel_id, thread_id = %thread.id, %thread_name, "collecting thread");

            let messages = self.collect_pages(&thread.id, threshold).await;
            threads.push(ThreadCollection {
                thread_id: thread.id,
                thread_name,
                parent_id: channel_id.to_string(),
                messages,
            });
        }

        threads
    }

    /// Page one scope backward from the newest message until `threshold`.
    async fn collect_pages(&self, scope_id: &str, threshold: NaiveDateTime) -> Vec<Message> {
        let mut kept = Vec::new();
        let mut before: Option<String> = None;
        let mut requests = 0;

        loop {
            if requests >= self.config.max_requests {
                tracing::warn!(scope_id, requests, "page request cap reached");
                break;
            }

            if requests > 0 {
                self.pause().await;
            }

            let page = self
                .source
                .messages(scope_id, self.config.page_size, before.as_deref())
                .await;
            requests += 1;

            if page.is_empty() {
                break;
            }

            let straddles = page
                .iter()
                .filter_map(record_timestamp)
                .min()
                .is_some_and(|oldest| oldest < threshold);

            kept.extend(
                page.iter()
                    .filter_map(normalize)
                    .filter(|m| m.timestamp >= threshold),
            );

            if straddles {
                tracing::debug!(scope_id, requests, "reached the window threshold");
                break;
            }

            match page.last().and_then(record_id) {
                Some(id) => before = Some(id.to_string()),
                None => break,
            }
        }

        kept.sort_by_key(|m| m.timestamp);

        tracing::debug!(scope_id, requests, kept = kept.len(), "finished paging");

        kept
    }

    async fn pause(&self) {
        let jitter = self.config.page_jitter.mul_f64(rand::random::<f64>());
        let delay = self.config.page_delay + jitter;

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Start of the window. Windows reaching past chrono's range start at the
/// earliest representable time.
pub fn window_threshold(window_days: u32) -> NaiveDateTime {
    chrono::Duration::try_days(i64::from(window_days))
        .and_then(|window| chrono::Utc::now().naive_utc().checked_sub_signed(window))
        .unwrap_or(NaiveDateTime::MIN)
}

fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}
