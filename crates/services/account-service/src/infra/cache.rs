//! Authentication cache tiers.
//!
//! Cached auth checks let a returning session skip the login prompt. When an
//! account is removed its entry has to go from every tier, otherwise a stale
//! check would outlive the record that backed it.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};
use tracing::{debug, info, warn};

use common::{AppResult, CacheConfig};

/// Cache key prefix for auth checks
const CACHE_PREFIX_AUTH: &str = "auth:";

/// A remembered successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedAuthCheck {
    pub nickname: String,
    pub ip: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedAuthCheck {
    pub fn new(nickname: impl Into<String>, ip: impl Into<String>, ttl: Duration) -> Self {
        Self {
            nickname: nickname.into(),
            ip: ip.into(),
            expires_at: Utc::now() + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Authentication cache seam used by the unregistration flow.
///
/// Eviction never fails from the caller's point of view; tiers that talk to
/// remote stores log their own failures.
#[async_trait]
pub trait AuthCache: Send + Sync {
    /// Remove every cached entry for a lowercase key
    async fn evict(&self, lowercase_key: &str);
}

// =============================================================================
// In-process tier
// =============================================================================

/// In-process map of cached auth checks.
#[derive(Default)]
pub struct LocalAuthCache {
    entries: RwLock<HashMap<String, CachedAuthCheck>>,
}

impl LocalAuthCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, lowercase_key: impl Into<String>, check: CachedAuthCheck) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(lowercase_key.into(), check);
    }

    /// Whether a live check exists; expired entries read as absent.
    pub fn contains(&self, lowercase_key: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(lowercase_key)
            .is_some_and(|check| !check.is_expired())
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AuthCache for LocalAuthCache {
    async fn evict(&self, lowercase_key: &str) {
        let removed = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(lowercase_key);

        if removed.is_some() {
            debug!(key = %lowercase_key, "Evicted local auth cache entry");
        }
    }
}

// =============================================================================
// Redis tier
// =============================================================================

/// Auth checks shared between service instances through Redis.
#[derive(Clone)]
pub struct RedisAuthCache {
    conn: ConnectionManager,
    evict_timeout: StdDuration,
}

impl RedisAuthCache {
    /// Connect to Redis.
    pub async fn connect(config: &CacheConfig) -> AppResult<Self> {
        debug!("Connecting to Redis auth cache");
        let client = redis::Client::open(config.url.as_str())?;
        let conn = ConnectionManager::new(client).await?;
        info!("Redis auth cache connected");

        Ok(Self {
            conn,
            evict_timeout: StdDuration::from_millis(config.evict_timeout_ms),
        })
    }

    fn key(lowercase_key: &str) -> String {
        format!("{}{}", CACHE_PREFIX_AUTH, lowercase_key)
    }
}

#[async_trait]
impl AuthCache for RedisAuthCache {
    async fn evict(&self, lowercase_key: &str) {
        let mut conn = self.conn.clone();
        let delete = conn.del::<_, ()>(Self::key(lowercase_key));
        bounded_evict(lowercase_key, self.evict_timeout, delete).await;
    }
}

/// Await a remote eviction for at most `limit`. Returns whether it completed.
async fn bounded_evict<F>(lowercase_key: &str, limit: StdDuration, eviction: F) -> bool
where
    F: Future<Output = RedisResult<()>>,
{
    match tokio::time::timeout(limit, eviction).await {
        Ok(Ok(())) => {
            debug!(key = %lowercase_key, "Evicted Redis auth cache entry");
            true
        }
        Ok(Err(e)) => {
            warn!(key = %lowercase_key, "Redis auth cache eviction failed: {}", e);
            false
        }
        Err(_) => {
            warn!(
                key = %lowercase_key,
                timeout_ms = limit.as_millis() as u64,
                "Redis auth cache eviction timed out"
            );
            false
        }
    }
}

// =============================================================================
// Layered
// =============================================================================

/// Evicts from every configured tier concurrently.
#[derive(Clone, Default)]
pub struct LayeredAuthCache {
    tiers: Vec<Arc<dyn AuthCache>>,
}

impl LayeredAuthCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tier(mut self, tier: Arc<dyn AuthCache>) -> Self {
        self.tiers.push(tier);
        self
    }
}

#[async_trait]
impl AuthCache for LayeredAuthCache {
    async fn evict(&self, lowercase_key: &str) {
        join_all(self.tiers.iter().map(|tier| tier.evict(lowercase_key))).await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use redis::{ErrorKind, RedisError};

    use super::*;

    fn fresh_check() -> CachedAuthCheck {
        CachedAuthCheck::new("Alice", "127.0.0.1", Duration::hours(1))
    }

    #[tokio::test]
    async fn test_local_evict_removes_entry() {
        let cache = LocalAuthCache::new();
        cache.insert("alice", fresh_check());
        cache.insert("bob", fresh_check());

        cache.evict("alice").await;

        assert!(!cache.contains("alice"));
        assert!(cache.contains("bob"));
    }

    #[tokio::test]
    async fn test_local_evict_missing_key_is_noop() {
        let cache = LocalAuthCache::new();
        cache.evict("ghost").await;
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expired_entries_read_as_absent() {
        let cache = LocalAuthCache::new();
        cache.insert("alice", CachedAuthCheck::new("Alice", "::1", Duration::seconds(-1)));
        cache.insert("bob", fresh_check());

        assert!(!cache.contains("alice"));
        assert!(cache.contains("bob"));
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_layered_evicts_every_tier() {
        let first = Arc::new(LocalAuthCache::new());
        let second = Arc::new(LocalAuthCache::new());
        first.insert("alice", fresh_check());
        second.insert("alice", fresh_check());

        let layered = LayeredAuthCache::new()
            .with_tier(first.clone())
            .with_tier(second.clone());
        layered.evict("alice").await;

        assert!(!first.contains("alice"));
        assert!(!second.contains("alice"));
    }

    #[test]
    fn test_redis_keys_are_prefixed() {
        assert_eq!(RedisAuthCache::key("alice"), "auth:alice");
    }

    #[tokio::test]
    async fn test_bounded_evict_reports_completion() {
        assert!(bounded_evict("alice", StdDuration::from_secs(1), async { Ok(()) }).await);
    }

    #[tokio::test]
    async fn test_bounded_evict_swallows_redis_errors() {
        let failing = async { Err(RedisError::from((ErrorKind::IoError, "connection reset"))) };
        assert!(!bounded_evict("alice", StdDuration::from_secs(1), failing).await);
    }

    #[tokio::test]
    async fn test_bounded_evict_gives_up_on_hung_redis() {
        let started = Instant::now();

        let hung = std::future::pending::<RedisResult<()>>();
        let completed = bounded_evict("alice", StdDuration::from_millis(20), hung).await;

        assert!(!completed);
        assert!(started.elapsed() < StdDuration::from_secs(5));
    }
}
