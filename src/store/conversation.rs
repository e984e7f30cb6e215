//! Per-channel conversation memory.
//!
//! Turns are kept as a JSON array string under the channel id. Every access rewrites the
//! entry, so a conversation is forgotten after [`HISTORY_TTL`] without activity.
//! Appends are read-modify-write without coordination: two passes racing on the same
//! channel resolve last-writer-wins and one turn may be lost.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use super::cache::TtlCache;

pub const HISTORY_TTL: Duration = Duration::from_secs(600);

pub struct ConversationStore {
    cache: Arc<dyn TtlCache>,
    ttl: Duration,
}

impl ConversationStore {
    pub fn new(cache: Arc<dyn TtlCache>) -> Self {
        Self {
            cache,
            ttl: HISTORY_TTL,
        }
    }

    /// Returns the stored turns, oldest first, and refreshes their expiry.
    pub async fn read(&self, key: &str) -> Vec<String> {
        self.read_and_append(key, None).await
    }

    /// Appends `turn` and returns the full log including it.
    pub async fn append(&self, key: &str, turn: String) -> Vec<String> {
        self.read_and_append(key, Some(turn)).await
    }

    pub async fn clear(&self, key: &str) {
        debug!("Clearing conversation history for {key}");
        self.cache.remove(key).await;
    }

    async fn read_and_append(&self, key: &str, turn: Option<String>) -> Vec<String> {
        let mut turns: Vec<String> = match self.cache.get(key).await {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Discarding unreadable history for {key}: {e}");
                Vec::new()
            }),
            None => Vec::new(),
        };
        turns.extend(turn);

        match serde_json::to_string(&turns) {
            Ok(raw) => self.cache.put(key, raw, self.ttl).await,
            Err(e) => warn!("Failed to serialize history for {key}: {e}"),
        }

        debug!("Conversation {key} has {} turns", turns.len());
        turns
    }
}
