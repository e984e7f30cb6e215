//! Suppression of re-delivered Slack events.

use std::sync::Arc;
use std::time::Duration;

use log::info;

use super::cache::TtlCache;

/// How long an event id is remembered. Slack retries within this window.
pub const DEDUP_WINDOW: Duration = Duration::from_secs(60);

const SEEN: &str = "true";

pub struct Deduplicator {
    cache: Arc<dyn TtlCache>,
    window: Duration,
}

impl Deduplicator {
    pub fn new(cache: Arc<dyn TtlCache>) -> Self {
        Self {
            cache,
            window: DEDUP_WINDOW,
        }
    }

    /// Returns `true` if `(channel, ts)` was already seen within [`DEDUP_WINDOW`],
    /// otherwise records it and returns `false`. Check and record are a single cache
    /// operation, so of two concurrent deliveries exactly one gets `false`.
    ///
    /// `ts` is the message timestamp, not `event_ts`, which points at the thread root.
    pub async fn is_duplicate(&self, channel: &str, ts: &str) -> bool {
        let key = format!("{channel}:{ts}");
        let claimed = self
            .cache
            .insert_if_absent(&key, SEEN.to_string(), self.window)
            .await;
        if !claimed {
            info!("Skipping duplicate event {key}");
        }
        !claimed
    }
}
