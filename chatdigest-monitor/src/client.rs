use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::fetcher::Fetcher;
use crate::source::{ChannelInfo, ChannelSource, GuildInfo};
use crate::{Config, MonitorResult};

/// Live source backed by the Discord REST API.
pub struct DiscordReader {
    fetcher: Fetcher,
}

impl DiscordReader {
    pub fn new(config: &Config) -> Self {
        Self {
            fetcher: Fetcher::new(config),
        }
    }

    async fn fetch_list(&self, endpoint: &str) -> Vec<Value> {
        match self.fetcher.get(endpoint).await {
            Ok(Value::Array(items)) => items,
            Ok(other) => {
                tracing::warn!(endpoint, kind = json_kind(&other), "expected a list");
                Vec::new()
            }
            Err(error) => {
                tracing::error!(%error, endpoint, "failed to fetch list");
                Vec::new()
            }
        }
    }

    async fn fetch_one<T: DeserializeOwned>(&self, endpoint: &str) -> Option<T> {
        self.try_fetch_one(endpoint)
            .await
            .inspect_err(|error| tracing::error!(%error, endpoint, "failed to fetch item"))
            .ok()
    }

    async fn try_fetch_one<T: DeserializeOwned>(&self, endpoint: &str) -> MonitorResult<T> {
        let value = self.fetcher.get(endpoint).await?;
        Ok(serde_json::from_value(value)?)
    }
}

impl ChannelSource for DiscordReader {
    async fn user_guilds(&self) -> Vec<GuildInfo> {
        decode_items(self.fetch_list("/users/@me/guilds").await)
    }

    async fn guild_channels(&self, guild_id: &str) -> Vec<ChannelInfo> {
        decode_items(self.fetch_list(&format!("/guilds/{guild_id}/channels")).await)
    }

    async fn channel_info(&self, channel_id: &str) -> Option<ChannelInfo> {
        self.fetch_one(&format!("/channels/{channel_id}")).await
    }

    async fn messages(&self, channel_id: &str, limit: u32, before: Option<&str>) -> Vec<Value> {
        let mut endpoint = format!("/channels/{channel_id}/messages?limit={limit}");
        if let Some(before) = before {
            endpoint.push_str("&before=");
            endpoint.push_str(before);
        }

        self.fetch_list(&endpoint).await
    }

    async fn active_threads(&self, channel_id: &str) -> Vec<ChannelInfo> {
        let endpoint = format!("/channels/{channel_id}/threads/active");

        let items = match self.fetcher.get(&endpoint).await {
            Ok(Value::Array(items)) => items,
            Ok(Value::Object(mut body)) => match body.remove("threads") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            Ok(_) => Vec::new(),
            Err(error) => {
                tracing::error!(%error, %channel_id, "failed to fetch active threads");
                Vec::new()
            }
        };

        decode_items(items)
    }
}

/// Decode each item on its own so one malformed entry does not drop the rest.
fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| {
            serde_json::from_value(item)
                .inspect_err(|error| tracing::warn!(%error, "skipping malformed item"))
                .ok()
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
