use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

use super::types::{CacheBackend, CacheEntry, InMemoryCacheBackend};

const CACHE_PREFIX: &str = "cache";

impl InMemoryCacheBackend {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory session cache backend");
        Self {
            entry: Mutex::new(HashMap::new()),
        }
    }

    fn make_key(prefix: &str, key: &str) -> String {
        format!("{CACHE_PREFIX}:{prefix}:{key}")
    }
}

impl Default for InMemoryCacheBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheBackend for InMemoryCacheBackend {
    async fn init(&self) -> Result<(), StorageError> {
        Ok(()) // Nothing to initialize for in-memory backend
    }

    async fn put_with_ttl(
        &self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: usize,
    ) -> Result<(), StorageError> {
        let key = Self::make_key(prefix, key);
        let now = Instant::now();
        let entry = CacheEntry {
            data: value,
            expires_at: now.checked_add(Duration::from_secs(ttl as u64)),
        };

        let mut entries = self.entry.lock().await;
        // Sweep on write so abandoned sessions do not pile up
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        if entries.len() < before {
            tracing::debug!(evicted = before - entries.len(), "Evicted expired cache entries");
        }
        entries.insert(key, entry);
        Ok(())
    }

    async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError> {
        let key = Self::make_key(prefix, key);
        let mut entries = self.entry.lock().await;

        let expired = match entries.get(&key) {
            None => return Ok(None),
            Some(entry) => entry.is_expired(Instant::now()),
        };
        if expired {
            entries.remove(&key);
            return Ok(None);
        }
        Ok(entries.get(&key).map(|entry| entry.data.clone()))
    }
}
