use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

/// Cache key for a user's recommendation set.
pub fn recommendations_key(user_id: &str) -> String {
    format!("job_recommendations:{user_id}")
}

/// Best-effort cache for serialized recommendation sets.
///
/// The signatures are infallible on purpose: a backend that is down behaves
/// like a permanent miss, so callers fall through to recomputation without
/// ever branching on availability.
#[async_trait]
pub trait RecommendationCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String, ttl: Duration);
    async fn del(&self, key: &str);
}

/// Null Object cache: every lookup misses, every write is dropped. Stands in
/// when no cache backend is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

#[async_trait]
impl RecommendationCache for NoopCache {
    async fn get(&self, _key: &str) -> Option<String> {
        None
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) {}

    async fn del(&self, _key: &str) {}
}

/// Process-local cache with per-entry expiry. Expired entries are dropped
/// lazily on lookup.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

#[async_trait]
impl RecommendationCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value, Instant::now() + ttl));
    }

    async fn del(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_cache_round_trips_until_expiry() {
        let cache = MemoryCache::default();
        cache
            .set("k", "v".into(), Duration::from_secs(60))
            .await;
        assert_eq!(cache.get("k").await.as_deref(), Some("v"));

        cache.del("k").await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn expired_entries_read_as_misses() {
        let cache = MemoryCache::default();
        cache.set("k", "v".into(), Duration::ZERO).await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn del_is_idempotent() {
        let cache = MemoryCache::default();
        cache.del("absent").await;
        cache.del("absent").await;
    }

    #[tokio::test]
    async fn noop_cache_always_misses() {
        let cache = NoopCache;
        cache
            .set("k", "v".into(), Duration::from_secs(60))
            .await;
        assert_eq!(cache.get("k").await, None);
    }

    #[test]
    fn key_format_is_stable() {
        assert_eq!(recommendations_key("u1"), "job_recommendations:u1");
    }
}
