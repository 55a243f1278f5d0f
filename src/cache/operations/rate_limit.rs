use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::{Client as RedisClient, IntoConnectionInfo};
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Shared counter store. `increment` must be atomic across concurrent callers
/// and must leave the key expiring after `ttl`.
#[async_trait]
pub trait CounterStore: Send + Sync {
    async fn increment(&self, key: &str, ttl: Duration) -> Result<u64, CacheError>;
}

/// Redis-backed counters
#[derive(Clone)]
pub struct RedisCounterStore {
    redis: Arc<RedisClient>,
}

impl RedisCounterStore {
    pub fn new(redis: RedisClient) -> Self {
        Self {
            redis: Arc::new(redis),
        }
    }

    /// Opens a client for `url`, using `token` as the password when given.
    pub fn connect(url: &str, token: Option<&str>) -> Result<Self, CacheError> {
        let mut info = url.into_connection_info()?;
        if let Some(token) = token {
            info.redis.password = Some(token.to_string());
        }
        Ok(Self::new(RedisClient::open(info)?))
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn increment(&self, key: &str, ttl: Duration) -> Result<u64, CacheError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        // INCR and EXPIRE in one MULTI so a counter never lives without a TTL
        let (count,): (u64,) = redis::pipe()
            .atomic()
            .incr(key, 1u64)
            .expire(key, ttl.as_secs().max(1) as i64)
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(count)
    }
}

/// In-process counters for single-instance deployments and tests
#[derive(Default)]
pub struct MemoryCounterStore {
    counters: Mutex<HashMap<String, (u64, Instant)>>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn increment(&self, key: &str, ttl: Duration) -> Result<u64, CacheError> {
        let now = Instant::now();
        let mut counters = self.counters.lock().await;
        counters.retain(|_, (_, expires_at)| *expires_at > now);

        let entry = counters
            .entry(key.to_string())
            .or_insert_with(|| (0, now + ttl));
        entry.0 += 1;
        Ok(entry.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_counts_per_key() {
        let store = MemoryCounterStore::new();
        let ttl = Duration::from_secs(60);
        assert_eq!(store.increment("a", ttl).await.unwrap(), 1);
        assert_eq!(store.increment("a", ttl).await.unwrap(), 2);
        assert_eq!(store.increment("b", ttl).await.unwrap(), 1);
        assert_eq!(store.increment("b", ttl).await.unwrap(), 2);
        assert_eq!(store.increment("a", ttl).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn memory_store_expires_keys() {
        let store = MemoryCounterStore::new();
        assert_eq!(store.increment("a", Duration::from_millis(20)).await.unwrap(), 1);
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(store.increment("a", Duration::from_millis(20)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn concurrent_increments_are_not_lost() {
        let store = Arc::new(MemoryCounterStore::new());
        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.increment("shared", Duration::from_secs(60)).await.unwrap()
            }));
        }
        let mut seen = Vec::new();
        for handle in handles {
            seen.push(handle.await.unwrap());
        }
        seen.sort_unstable();
        assert_eq!(seen, (1..=50).collect::<Vec<u64>>());
    }

    #[test]
    fn token_becomes_password() {
        let store = RedisCounterStore::connect("redis://127.0.0.1:6379", Some("secret")).unwrap();
        assert_eq!(
            store.redis.get_connection_info().redis.password.as_deref(),
            Some("secret")
        );
    }

    #[test]
    fn bad_url_is_rejected() {
        assert!(RedisCounterStore::connect("not a url", None).is_err());
    }
}
