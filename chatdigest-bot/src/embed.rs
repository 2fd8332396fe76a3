use chatdigest_common::Summary;

pub(crate) const DESCRIPTION_MAX_LENGTH: usize = 4096;
pub(crate) const TITLE_MAX_LENGTH: usize = 256;
pub(crate) const MAX_EMBEDS_PER_MESSAGE: usize = 10;
/// Combined text of all embeds in one message.
pub(crate) const MESSAGE_MAX_EMBED_CHARS: usize = 6000;

pub const SUMMARY_COLOR: u32 = 0x3498DB;
pub const ERROR_COLOR: u32 = 0xE74C3C;
pub const DEFAULT_ERROR_TITLE: &str = "Error Generating Summary";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

impl Embed {
    fn char_count(&self) -> usize {
        self.title.as_deref().map_or(0, |t| t.chars().count())
            + self.description.chars().count()
            + self.footer.as_ref().map_or(0, |f| f.text.chars().count())
    }
}

/// Embeds for one summary, grouped into the messages they are sent in.
///
/// The title goes on the first embed and the footer on the last one.
pub fn summary_messages(summary: &Summary) -> Vec<Vec<Embed>> {
    let parts = split_description(&summary.content);
    let last = parts.len() - 1;

    let embeds = parts
        .into_iter()
        .enumerate()
        .map(|(idx, description)| Embed {
            title: (idx == 0).then(|| {
                truncate_chars(&format!("{} ({})", summary.title, summary.date), TITLE_MAX_LENGTH)
            }),
            description,
            color: SUMMARY_COLOR,
            footer: (idx == last).then(|| EmbedFooter {
                text: format!(
                    "Summary by {} • {} messages analyzed",
                    summary.provider_name, summary.message_count
                ),
            }),
            timestamp: None,
        })
        .collect();

    group_embeds(embeds)
}

pub fn error_embed(message: &str, title: Option<&str>, now: chrono::DateTime<chrono::Utc>) -> Embed {
    Embed {
        title: Some(truncate_chars(title.unwrap_or(DEFAULT_ERROR_TITLE), TITLE_MAX_LENGTH)),
        description: truncate_chars(message, DESCRIPTION_MAX_LENGTH),
        color: ERROR_COLOR,
        footer: None,
        timestamp: Some(now.to_rfc3339()),
    }
}

/// Chunks of at most [`DESCRIPTION_MAX_LENGTH`] characters (not bytes).
pub fn split_description(text: &str) -> Vec<String> {
    let chars = text.chars().collect::<Vec<_>>();
    let total_len = chars.len();

    if total_len <= DESCRIPTION_MAX_LENGTH {
        return vec![text.to_string()];
    }

    let mut parts = Vec::new();
    let mut start = 0;

    while start < total_len {
        let mut end = (start + DESCRIPTION_MAX_LENGTH).min(total_len);

        if end < total_len {
            // Prefer a newline in the second half of the chunk
            let search_start = start + DESCRIPTION_MAX_LENGTH / 2;
            if let Some(newline_pos) = chars[search_start..end].iter().rposition(|&c| c == '\n') {
                end = search_start + newline_pos + 1;
            }
        }

        parts.push(chars[start..end].iter().collect());
        start = end;
    }

    parts
}

/// Pack embeds into messages without exceeding the per-message limits.
pub fn group_embeds(embeds: Vec<Embed>) -> Vec<Vec<Embed>> {
    let mut messages = Vec::new();
    let mut current: Vec<Embed> = Vec::new();
    let mut current_chars = 0;

    for embed in embeds {
        let chars = embed.char_count();

        if !current.is_empty()
            && (current.len() >= MAX_EMBEDS_PER_MESSAGE
                || current_chars + chars > MESSAGE_MAX_EMBED_CHARS)
        {
            messages.push(std::mem::take(&mut current));
            current_chars = 0;
        }

        current_chars += chars;
        current.push(embed);
    }

    if !current.is_empty() {
        messages.push(current);
    }

    messages
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
