//! TTL key-value cache.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::debug;
use moka::Expiry;
use moka::future::Cache;

/// Key-value service whose entries expire after a per-entry time to live.
#[async_trait]
pub trait TtlCache: Send + Sync {
    /// Returns the live value for `key`, if any.
    async fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value and its expiry.
    async fn put(&self, key: &str, value: String, ttl: Duration);

    /// Stores `value` under `key` only if no live entry exists. Returns `true` if this call
    /// inserted it. Concurrent callers on the same key see exactly one `true`.
    async fn insert_if_absent(&self, key: &str, value: String, ttl: Duration) -> bool;

    async fn remove(&self, key: &str);
}

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expiry read from the entry itself; reads never extend it.
struct EntryTtl;

impl Expiry<String, Entry> for EntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-process [`TtlCache`] backed by `moka`. Expired entries are evicted by the cache's
/// housekeeping, not only when their key is read again.
#[derive(Clone)]
pub struct MemoryCache {
    entries: Cache<String, Entry>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().expire_after(EntryTtl).build(),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TtlCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).await.map(|entry| entry.value)
    }

    async fn put(&self, key: &str, value: String, ttl: Duration) {
        self.entries
            .insert(key.to_string(), Entry { value, ttl })
            .await;
    }

    async fn insert_if_absent(&self, key: &str, value: String, ttl: Duration) -> bool {
        let inserted = self
            .entries
            .entry(key.to_string())
            .or_insert_with(async move { Entry { value, ttl } })
            .await
            .is_fresh();
        if !inserted {
            debug!("Cache entry '{key}' already present");
        }
        inserted
    }

    async fn remove(&self, key: &str) {
        self.entries.invalidate(key).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: Duration = Duration::from_millis(100);

    #[tokio::test]
    async fn put_then_get() {
        let cache = MemoryCache::new();
        cache
            .put("k", "v".to_string(), Duration::from_secs(60))
            .await;
        assert_eq!(cache.get("k").await.as_deref(), Some("v"));
        assert_eq!(cache.get("missing").await, None);
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let cache = MemoryCache::new();
        cache.put("k", "v".to_string(), SHORT).await;
        assert!(cache.get("k").await.is_some());

        tokio::time::sleep(SHORT * 2).await;
        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn put_refreshes_expiry() {
        let cache = MemoryCache::new();
        cache.put("k", "a".to_string(), SHORT * 3).await;
        tokio::time::sleep(SHORT * 2).await;
        cache.put("k", "b".to_string(), SHORT * 3).await;
        tokio::time::sleep(SHORT * 2).await;
        assert_eq!(cache.get("k").await.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn reads_do_not_extend_expiry() {
        let cache = MemoryCache::new();
        cache.put("k", "v".to_string(), SHORT * 3).await;
        tokio::time::sleep(SHORT * 2).await;
        assert!(cache.get("k").await.is_some());
        tokio::time::sleep(SHORT * 2).await;
        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn remove_deletes_entry() {
        let cache = MemoryCache::new();
        cache.put("k", "v".to_string(), Duration::from_secs(60)).await;
        cache.remove("k").await;
        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn insert_if_absent_only_once() {
        let cache = MemoryCache::new();
        let ttl = Duration::from_secs(60);
        assert!(cache.insert_if_absent("k", "a".to_string(), ttl).await);
        assert!(!cache.insert_if_absent("k", "b".to_string(), ttl).await);
        assert_eq!(cache.get("k").await.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn insert_if_absent_after_expiry() {
        let cache = MemoryCache::new();
        assert!(cache.insert_if_absent("k", "a".to_string(), SHORT).await);
        tokio::time::sleep(SHORT * 2).await;
        assert!(cache.insert_if_absent("k", "b".to_string(), SHORT).await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_claim_once() {
        let cache = MemoryCache::new();
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    cache
                        .insert_if_absent("k", i.to_string(), Duration::from_secs(60))
                        .await
                })
            })
            .collect();

        let mut claimed = 0;
        for handle in handles {
            if handle.await.unwrap() {
                claimed += 1;
            }
        }
        assert_eq!(claimed, 1);
    }

    #[tokio::test]
    async fn expired_entries_are_evicted_without_reads() {
        let cache = MemoryCache::new();
        for i in 0..1000 {
            cache.put(&format!("C1:{i}"), "true".to_string(), SHORT).await;
        }
        tokio::time::sleep(SHORT * 2).await;

        cache
            .put("fresh", "v".to_string(), Duration::from_secs(60))
            .await;
        cache.entries.run_pending_tasks().await;
        assert_eq!(cache.entries.entry_count(), 1);
        assert_eq!(cache.get("fresh").await.as_deref(), Some("v"));
    }
}
