//! Conversion of raw source records into [`Message`]s.

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

use crate::Message;

const UNKNOWN_AUTHOR: &str = "Unknown";
const UNKNOWN_ID: &str = "0";

#[derive(Deserialize)]
struct RawAuthor {
    id: Option<String>,
    username: Option<String>,
}

#[derive(Deserialize)]
struct RawMessage {
    id: Option<String>,
    content: Option<String>,
    author: Option<RawAuthor>,
    timestamp: Option<String>,
    channel_id: Option<String>,
    attachments: Option<Vec<serde_json::Value>>,
    embeds: Option<Vec<serde_json::Value>>,
    mentions: Option<Vec<serde_json::Value>>,
}

/// Parse a source timestamp into naive UTC.
///
/// RFC 3339 values are shifted to UTC before the offset is dropped. Anything
/// else gets a trailing `Z` stripped and is read as a naive ISO-8601 value.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_utc());
    }

    NaiveDateTime::parse_from_str(value.trim_end_matches('Z'), "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Timestamp of a raw record without normalizing the rest of it.
pub fn record_timestamp(raw: &serde_json::Value) -> Option<NaiveDateTime> {
    raw.get("timestamp")
        .and_then(serde_json::Value::as_str)
        .and_then(parse_timestamp)
}

/// Convert one raw record into a [`Message`].
///
/// Returns `None` for records without text content (image or embed only
/// posts), and for records that fail to parse.
pub fn normalize(raw: &serde_json::Value) -> Option<Message> {
    let record = match RawMessage::deserialize(raw) {
        Ok(record) => record,
        Err(error) => {
            tracing::warn!(%error, "skipping malformed message record");
            return None;
        }
    };

    let content = record.content.filter(|c| !c.is_empty())?;

    let timestamp = match record.timestamp.as_deref() {
        Some(value) => match parse_timestamp(value) {
            Some(timestamp) => timestamp,
            None => {
                tracing::warn!(timestamp = value, "skipping message with unparsable timestamp");
                return None;
            }
        },
        None => chrono::Utc::now().naive_utc(),
    };

    let (author_name, author_id) = match record.author {
        Some(RawAuthor { id, username }) => (
            username.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            id.unwrap_or_else(|| UNKNOWN_ID.to_string()),
        ),
        None => (UNKNOWN_AUTHOR.to_string(), UNKNOWN_ID.to_string()),
    };

    Some(Message {
        id: record.id.unwrap_or_else(|| UNKNOWN_ID.to_string()),
        content,
        author_name,
        author_id,
        timestamp,
        channel_id: record.channel_id.unwrap_or_else(|| UNKNOWN_ID.to_string()),
        attachments_count: record.attachments.map_or(0, |a| a.len()),
        embeds_count: record.embeds.map_or(0, |e| e.len()),
        mentions_count: record.mentions.map_or(0, |m| m.len()),
    })
}

/// Inverse of [`normalize`], used when replaying captured messages.
pub fn to_record(message: &Message) -> serde_json::Value {
    serde_json::json!({
        "id": message.id,
        "content": message.content,
        "author": {
            "id": message.author_id,
            "username": message.author_name,
        },
        "timestamp": message.timestamp.format("%Y-%m-%dT%H:%M:%S%.f+00:00").to_string(),
        "channel_id": message.channel_id,
        "attachments": vec![serde_json::Value::Null; message.attachments_count],
        "embeds": vec![serde_json::Value::Null; message.embeds_count],
        "mentions": vec![serde_json::Value::Null; message.mentions_count],
    })
}
