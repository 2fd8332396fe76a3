//! Offline snapshots of collected messages.
//!
//! A [`Capture`] is written by the `extract` command and can be replayed
//! through [`CaptureSource`], which serves the stored messages the way the live
//! API would so the real collector runs unchanged.

use std::path::Path;

use chatdigest_common::normalize::to_record;
use chatdigest_common::{ChannelCollection, Message};
use indexmap::IndexMap;
use serde_json::Value;

use crate::MonitorResult;
use crate::source::{ChannelInfo, ChannelSource, GuildInfo, TEXT_CHANNEL};

/// Channel type code of a public thread.
const PUBLIC_THREAD: u8 = 11;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Capture {
    #[serde(default)]
    pub channels: IndexMap<String, CapturedChannel>,
    #[serde(default)]
    pub threads: IndexMap<String, CapturedThread>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CapturedChannel {
    pub channel_name: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CapturedThread {
    pub thread_name: String,
    pub parent_id: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Capture {
    pub fn from_collections<'a>(collections: impl IntoIterator<Item = &'a ChannelCollection>) -> Self {
        let mut capture = Capture::default();

        for collection in collections {
            capture.channels.insert(
                collection.channel_id.clone(),
                CapturedChannel {
                    channel_name: collection.channel_name.clone(),
                    messages: collection.messages.clone(),
                },
            );

            for thread in &collection.threads {
                capture.threads.insert(
                    thread.thread_id.clone(),
                    CapturedThread {
                        thread_name: thread.thread_name.clone(),
                        parent_id: thread.parent_id.clone(),
                        messages: thread.messages.clone(),
                    },
                );
            }
        }

        capture
    }

    pub fn load(path: impl AsRef<Path>) -> MonitorResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> MonitorResult<()> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    pub fn message_count(&self) -> usize {
        self.channels.values().map(|c| c.messages.len()).sum::<usize>()
            + self.threads.values().map(|t| t.messages.len()).sum::<usize>()
    }

    fn scope_messages(&self, scope_id: &str) -> Option<&[Message]> {
        self.channels
            .get(scope_id)
            .map(|c| c.messages.as_slice())
            .or_else(|| self.threads.get(scope_id).map(|t| t.messages.as_slice()))
    }
}

/// [`ChannelSource`] that replays a [`Capture`].
///
/// Every captured channel is reported as a text channel of whatever guild is
/// asked for.
pub struct CaptureSource {
    capture: Capture,
}

impl CaptureSource {
    pub fn new(capture: Capture) -> Self {
        Self { capture }
    }

    pub fn load(path: impl AsRef<Path>) -> MonitorResult<Self> {
        Capture::load(path).map(Self::new)
    }
}

impl ChannelSource for CaptureSource {
    async fn user_guilds(&self) -> Vec<GuildInfo> {
        Vec::new()
    }

    async fn guild_channels(&self, _guild_id: &str) -> Vec<ChannelInfo> {
        self.capture
            .channels
            .iter()
            .map(|(id, channel)| ChannelInfo {
                id: id.clone(),
                name: Some(channel.channel_name.clone()),
                kind: TEXT_CHANNEL,
                parent_id: None,
            })
            .collect()
    }

    async fn channel_info(&self, channel_id: &str) -> Option<ChannelInfo> {
        if let Some(channel) = self.capture.channels.get(channel_id) {
            return Some(ChannelInfo {
                id: channel_id.to_string(),
                name: Some(channel.channel_name.clone()),
                kind: TEXT_CHANNEL,
                parent_id: None,
            });
        }

        self.capture.threads.get(channel_id).map(|thread| ChannelInfo {
            id: channel_id.to_string(),
            name: Some(thread.thread_name.clone()),
            kind: PUBLIC_THREAD,
            parent_id: Some(thread.parent_id.clone()),
        })
    }

    async fn messages(&self, channel_id: &str, limit: u32, before: Option<&str>) -> Vec<Value> {
        let Some(messages) = self.capture.scope_messages(channel_id) else {
            return Vec::new();
        };

        let mut newest_first: Vec<&Message> = messages.iter().collect();
        newest_first.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let start = match before {
            Some(before) => match newest_first.iter().position(|m| m.id == before) {
                Some(idx) => idx + 1,
                None => return Vec::new(),
            },
            None => 0,
        };

        newest_first
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .map(to_record)
            .collect()
    }

    async fn active_threads(&self, channel_id: &str) -> Vec<ChannelInfo> {
        self.capture
            .threads
            .iter()
            .filter(|(_, thread)| thread.parent_id == channel_id)
            .map(|(id, thread)| ChannelInfo {
                id: id.clone(),
                name: Some(thread.thread_name.clone()),
                kind: PUBLIC_THREAD,
                parent_id: Some(thread.parent_id.clone()),
            })
            .collect()
    }
}
