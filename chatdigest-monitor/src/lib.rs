pub mod capture;
mod client;
mod collect;
pub mod collector;
mod config;
mod error;
pub mod fetcher;
pub mod rate_limit;
pub mod source;
mod summary;

pub use capture::{Capture, CaptureSource};
pub use client::DiscordReader;
pub use collect::MessageCollector;
pub use collector::{Collector, CollectorConfig};
pub use config::Config;
pub use error::*;
pub use source::{ChannelInfo, ChannelSource, GuildInfo};
pub use summary::{COMBINED_CHANNEL_ID, COMBINED_CHANNEL_NAME, SummaryGenerator};

#[cfg(test)]
mod tests;
