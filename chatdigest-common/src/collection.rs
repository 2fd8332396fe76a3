use crate::Message;

/// Messages collected from one thread of a parent channel.
#[derive(Debug, Clone, Default)]
pub struct ThreadCollection {
    pub thread_id: String,
    pub thread_name: String,
    pub parent_id: String,
    pub messages: Vec<Message>,
}

/// Messages collected from one channel plus its configured threads.
///
/// Messages are kept in chronological order, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ChannelCollection {
    pub channel_id: String,
    pub channel_name: String,
    pub messages: Vec<Message>,
    pub threads: Vec<ThreadCollection>,
}

impl ChannelCollection {
    pub fn new(channel_id: impl Into<String>, channel_name: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            channel_name: channel_name.into(),
            ..Default::default()
        }
    }

    /// True when neither the channel nor any of its threads has messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.threads.iter().all(|t| t.messages.is_empty())
    }

    pub fn total_messages(&self) -> usize {
        self.messages.len() + self.threads.iter().map(|t| t.messages.len()).sum::<usize>()
    }

    /// Every message of the channel and its threads, in no particular order.
    pub fn all_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .chain(self.threads.iter().flat_map(|t| t.messages.iter()))
    }
}
