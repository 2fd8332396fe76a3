use chrono::NaiveDateTime;

/// A single chat message that survived normalization.
///
/// `timestamp` is naive UTC wall-clock time: the source offset is dropped
/// during parsing so every comparison in a run uses the same clock.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub author_name: String,
    pub author_id: String,
    pub timestamp: NaiveDateTime,
    pub channel_id: String,
    #[serde(default)]
    pub attachments_count: usize,
    #[serde(default)]
    pub embeds_count: usize,
    #[serde(default)]
    pub mentions_count: usize,
}

impl Message {
    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// `[time] author: content`, the line format fed to summarizers.
    pub fn formatted_line(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.formatted_time(),
            self.author_name,
            self.content
        )
    }
}
