use async_trait::async_trait;
use redis::{self, AsyncCommands};

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

use super::types::{CacheBackend, RedisCacheBackend};

const CACHE_PREFIX: &str = "cache";

impl RedisCacheBackend {
    pub fn open(url: &str) -> Result<Self, StorageError> {
        let client = redis::Client::open(url)?;
        Ok(Self { client })
    }

    fn make_key(prefix: &str, key: &str) -> String {
        format!("{CACHE_PREFIX}:{prefix}:{key}")
    }

    /// Value and TTL go out as one SETEX so a key never exists without its expiry.
    fn put_cmd(key: &str, value: &str, ttl: usize) -> redis::Cmd {
        redis::Cmd::set_ex(key, value, ttl as u64)
    }
}

#[async_trait]
impl CacheBackend for RedisCacheBackend {
    async fn init(&self) -> Result<(), StorageError> {
        // Verify the connection works
        let _conn = self.client.get_multiplexed_async_connection().await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, value))]
    async fn put_with_ttl(
        &self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: usize,
    ) -> Result<(), StorageError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let key = Self::make_key(prefix, key);
        let value = serde_json::to_string(&value)?;
        let _: () = Self::put_cmd(&key, &value, ttl)
            .query_async(&mut conn)
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let key = Self::make_key(prefix, key);
        let value: Option<String> = conn.get(&key).await?;

        match value {
            Some(v) => Ok(Some(
                serde_json::from_str(&v).map_err(|e| StorageError::Decode(e.to_string()))?,
            )),
            None => Ok(None),
        }
    }
}
