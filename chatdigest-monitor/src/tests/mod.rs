mod capture;
mod collector;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chatdigest_ai::{AiError, AiResult, Summarizer};
use serde_json::{Value, json};

use crate::collector::CollectorConfig;
use crate::source::{ChannelInfo, ChannelSource, GuildInfo, TEXT_CHANNEL};

fn test_config(page_size: u32) -> CollectorConfig {
    CollectorConfig {
        page_size,
        page_delay: Duration::ZERO,
        page_jitter: Duration::ZERO,
        ..Default::default()
    }
}

fn minutes_ago(minutes: i64) -> String {
    (chrono::Utc::now() - chrono::Duration::minutes(minutes)).to_rfc3339()
}

fn record(id: &str, content: &str, minutes: i64) -> Value {
    json!({
        "id": id,
        "content": content,
        "author": {"id": "7", "username": "alice"},
        "timestamp": minutes_ago(minutes),
        "channel_id": "c",
        "attachments": [],
        "embeds": [],
        "mentions": [],
    })
}

/// Records for one scope, newest first, one every `spacing` minutes.
fn spaced_records(prefix: &str, count: usize, spacing: i64) -> Vec<Value> {
    (0..count)
        .map(|i| record(&format!("{prefix}{i}"), &format!("message {i}"), i as i64 * spacing))
        .collect()
}

fn channel(id: &str, name: Option<&str>, kind: u8) -> ChannelInfo {
    ChannelInfo {
        id: id.to_string(),
        name: name.map(str::to_string),
        kind,
        parent_id: None,
    }
}

/// In-memory source serving fixed pages of newest-first records.
#[derive(Default)]
struct PagedSource {
    records: HashMap<String, Vec<Value>>,
    infos: HashMap<String, ChannelInfo>,
    guild: Vec<ChannelInfo>,
    threads: HashMap<String, Vec<ChannelInfo>>,
    requests: AtomicUsize,
    scopes: Mutex<Vec<String>>,
}

impl PagedSource {
    fn with_records(mut self, scope: &str, records: Vec<Value>) -> Self {
        self.records.insert(scope.to_string(), records);
        self
    }

    fn with_info(mut self, info: ChannelInfo) -> Self {
        self.infos.insert(info.id.clone(), info);
        self
    }

    fn with_guild_channel(mut self, info: ChannelInfo) -> Self {
        self.guild.push(info);
        self
    }

    fn with_thread(mut self, parent: &str, thread: ChannelInfo) -> Self {
        self.threads.entry(parent.to_string()).or_default().push(thread);
        self
    }

    fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn requested_scopes(&self) -> Vec<String> {
        self.scopes.lock().unwrap().clone()
    }
}

impl ChannelSource for PagedSource {
    async fn user_guilds(&self) -> Vec<GuildInfo> {
        Vec::new()
    }

    async fn guild_channels(&self, _guild_id: &str) -> Vec<ChannelInfo> {
        self.guild.clone()
    }

    async fn channel_info(&self, channel_id: &str) -> Option<ChannelInfo> {
        self.infos.get(channel_id).cloned()
    }

    async fn messages(&self, channel_id: &str, limit: u32, before: Option<&str>) -> Vec<Value> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.scopes.lock().unwrap().push(channel_id.to_string());

        let Some(records) = self.records.get(channel_id) else {
            return Vec::new();
        };

        let start = match before {
            Some(before) => records
                .iter()
                .position(|r| r["id"] == before)
                .map_or(records.len(), |idx| idx + 1),
            None => 0,
        };

        records.iter().skip(start).take(limit as usize).cloned().collect()
    }

    async fn active_threads(&self, channel_id: &str) -> Vec<ChannelInfo> {
        self.threads.get(channel_id).cloned().unwrap_or_default()
    }
}

/// Source whose history never ends and never leaves the window.
#[derive(Default)]
struct EndlessSource {
    requests: AtomicUsize,
}

impl ChannelSource for EndlessSource {
    async fn user_guilds(&self) -> Vec<GuildInfo> {
        Vec::new()
    }

    async fn guild_channels(&self, _guild_id: &str) -> Vec<ChannelInfo> {
        Vec::new()
    }

    async fn channel_info(&self, channel_id: &str) -> Option<ChannelInfo> {
        Some(channel(channel_id, Some("endless"), TEXT_CHANNEL))
    }

    async fn messages(&self, _channel_id: &str, limit: u32, _before: Option<&str>) -> Vec<Value> {
        let page = self.requests.fetch_add(1, Ordering::SeqCst);
        (0..limit)
            .map(|i| record(&format!("{page}-{i}"), "still here", 0))
            .collect()
    }

    async fn active_threads(&self, _channel_id: &str) -> Vec<ChannelInfo> {
        Vec::new()
    }
}

/// Summarizer whose answer depends on the rendered user prompt.
struct ScriptedSummarizer {
    name: &'static str,
    answer: Box<dyn Fn(&str) -> Option<String>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedSummarizer {
    fn new(name: &'static str, answer: impl Fn(&str) -> Option<String> + 'static) -> Self {
        Self {
            name,
            answer: Box::new(answer),
            calls: Arc::default(),
        }
    }

    fn answering(name: &'static str, text: &'static str) -> Self {
        Self::new(name, move |_| Some(text.to_string()))
    }

    fn failing(name: &'static str) -> Self {
        Self::new(name, |_| None)
    }

    /// Call counter that outlives handing the summarizer to a generator.
    fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Summarizer for ScriptedSummarizer {
    fn provider_name(&self) -> &'static str {
        self.name
    }

    fn max_input_chars(&self) -> usize {
        100_000
    }

    async fn complete(&self, _system: &str, user: &str) -> AiResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.answer)(user).ok_or_else(|| AiError::Api("scripted failure".to_string()))
    }
}

fn thread_ids(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}
