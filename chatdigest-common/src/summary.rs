use chrono::NaiveDateTime;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Summary {
    pub content: String,
    pub title: String,
    pub channel_id: String,
    pub channel_name: String,
    /// Messages across the channel and every included thread.
    pub message_count: usize,
    /// Backend that actually produced the content.
    pub provider_name: String,
    pub generation_time: NaiveDateTime,
    /// `YYYY-MM-DD` of `generation_time`.
    pub date: String,
}

impl Summary {
    pub fn new(
        content: String,
        channel_id: impl Into<String>,
        channel_name: impl Into<String>,
        message_count: usize,
        provider_name: impl Into<String>,
    ) -> Self {
        Self::generated_at(
            content,
            channel_id,
            channel_name,
            message_count,
            provider_name,
            chrono::Local::now().naive_local(),
        )
    }

    pub fn generated_at(
        content: String,
        channel_id: impl Into<String>,
        channel_name: impl Into<String>,
        message_count: usize,
        provider_name: impl Into<String>,
        generation_time: NaiveDateTime,
    ) -> Self {
        let channel_name = channel_name.into();

        Self {
            content,
            title: format!("Discord Summary: {channel_name}"),
            channel_id: channel_id.into(),
            channel_name,
            message_count,
            provider_name: provider_name.into(),
            date: generation_time.format("%Y-%m-%d").to_string(),
            generation_time,
        }
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    pub fn character_count(&self) -> usize {
        self.content.chars().count()
    }
}
