mod collection;
mod message;
pub mod normalize;
mod summary;

pub use collection::{ChannelCollection, ThreadCollection};
pub use message::Message;
pub use summary::Summary;
