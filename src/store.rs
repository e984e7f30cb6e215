//! Short-lived key-value state: event deduplication and conversation memory.

mod cache;
mod conversation;
mod dedupe;

pub use cache::{MemoryCache, TtlCache};
pub use conversation::ConversationStore;
pub use dedupe::Deduplicator;
