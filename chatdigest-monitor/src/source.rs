use serde_json::Value;

/// Channel type code of a guild text channel.
pub const TEXT_CHANNEL: u8 = 0;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChannelInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: u8,
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl ChannelInfo {
    pub fn is_text(&self) -> bool {
        self.kind == TEXT_CHANNEL
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GuildInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Read access to channels, threads and their message history.
///
/// Implementations never fail: a source error is logged and comes back as
/// empty data, so collection always returns whatever it already has.
pub trait ChannelSource {
    fn user_guilds(&self) -> impl Future<Output = Vec<GuildInfo>>;

    fn guild_channels(&self, guild_id: &str) -> impl Future<Output = Vec<ChannelInfo>>;

    fn channel_info(&self, channel_id: &str) -> impl Future<Output = Option<ChannelInfo>>;

    /// Raw message records, newest first, strictly older than `before` when given.
    fn messages(
        &self,
        channel_id: &str,
        limit: u32,
        before: Option<&str>,
    ) -> impl Future<Output = Vec<Value>>;

    fn active_threads(&self, channel_id: &str) -> impl Future<Output = Vec<ChannelInfo>>;
}
