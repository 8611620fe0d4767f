use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

pub struct InMemoryCacheBackend {
    pub(super) entry: Mutex<HashMap<String, CacheEntry>>,
}

pub(super) struct CacheEntry {
    pub(super) data: CacheData,
    /// `None` when the TTL is too long to represent, which never expires.
    pub(super) expires_at: Option<Instant>,
}

impl CacheEntry {
    pub(super) fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

pub struct RedisCacheBackend {
    pub(super) client: redis::Client,
}

/// Key/value backend used by the server-side session store.
#[async_trait]
pub trait CacheBackend: Send + Sync + 'static {
    /// Initialize the backend. Called once when the store is built.
    async fn init(&self) -> Result<(), StorageError>;

    /// Put an entry into the backend with a TTL in seconds.
    async fn put_with_ttl(
        &self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: usize,
    ) -> Result<(), StorageError>;

    /// Get an entry from the backend.
    async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError>;
}
