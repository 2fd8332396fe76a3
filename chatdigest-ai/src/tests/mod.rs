mod prompts;
mod summarizer;

use chatdigest_common::Message;
use chrono::NaiveDate;

fn message(id: &str, author: &str, content: &str, hour: u32) -> Message {
    Message {
        id: id.to_string(),
        content: content.to_string(),
        author_name: author.to_string(),
        author_id: "1".to_string(),
        timestamp: NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap(),
        channel_id: "100".to_string(),
        attachments_count: 0,
        embeds_count: 0,
        mentions_count: 0,
    }
}
