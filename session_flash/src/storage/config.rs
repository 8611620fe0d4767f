use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::config::{SESSION_STORE_TYPE, SESSION_STORE_URL};

use super::cache_session_store::CacheSessionStore;
use super::cache_store::{InMemoryCacheBackend, RedisCacheBackend};
use super::cookie_store::CookieSessionStore;
use super::errors::StorageError;
use super::types::SharedStore;

/// Builds the session store selected by `SESSION_STORE_TYPE`.
pub(crate) async fn store_from_env() -> Result<SharedStore, StorageError> {
    build_store(SESSION_STORE_TYPE.as_str(), SESSION_STORE_URL.as_str()).await
}

async fn build_store(store_type: &str, store_url: &str) -> Result<SharedStore, StorageError> {
    tracing::info!("Initializing session store with type: {}", store_type);

    let store: SharedStore = match store_type {
        "cookie" => Arc::new(CookieSessionStore::from_env()),
        "memory" => Arc::new(CacheSessionStore::new(InMemoryCacheBackend::new())),
        "redis" => {
            let store = CacheSessionStore::new(RedisCacheBackend::open(store_url)?);
            // Fail at startup rather than on the first request
            store.init().await.inspect_err(|e| {
                tracing::error!("Failed to connect to Redis at {}: {}", store_url, e);
            })?;
            tracing::info!("Connected to Redis session store at {}", store_url);
            Arc::new(store)
        }
        t => {
            return Err(StorageError::Config(format!(
                "Unsupported session store type: {t}. Supported types are 'cookie', 'memory' and 'redis'"
            )));
        }
    };

    Ok(store)
}

/// Cookie `Expires` time and `Max-Age` for a session living `max_age` seconds.
///
/// Rejects lifetimes that do not fit a cookie date rather than wrapping them.
pub(crate) fn session_expiry(max_age: u64) -> Result<(DateTime<Utc>, i64), StorageError> {
    let out_of_range =
        || StorageError::Config(format!("Session max age of {max_age} seconds is out of range"));

    let seconds = i64::try_from(max_age).map_err(|_| out_of_range())?;
    let expires_at = Duration::try_seconds(seconds)
        .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
        .ok_or_else(out_of_range)?;
    Ok((expires_at, seconds))
}
