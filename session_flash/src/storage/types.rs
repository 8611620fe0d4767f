use std::sync::Arc;

use async_trait::async_trait;
use http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::session::SessionData;
use crate::storage::errors::StorageError;

/// Data stored in a cache backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheData {
    pub value: String,
}

impl TryFrom<&SessionData> for CacheData {
    type Error = StorageError;

    fn try_from(data: &SessionData) -> Result<Self, Self::Error> {
        Ok(Self {
            value: serde_json::to_string(data)?,
        })
    }
}

impl TryFrom<CacheData> for SessionData {
    type Error = StorageError;

    fn try_from(data: CacheData) -> Result<Self, Self::Error> {
        serde_json::from_str(&data.value).map_err(|e| StorageError::Decode(e.to_string()))
    }
}

/// Backing store that correlates a request with its session.
///
/// `load` must succeed with a fresh session (`is_new() == true`, no values) when the
/// request carries no session for `name`. It fails only when a session was presented
/// and cannot be read back, or when the backend itself is unavailable.
///
/// `save` serializes the session and appends whatever `Set-Cookie` header the client
/// needs to present it again.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    async fn load(&self, headers: &HeaderMap, name: &str) -> Result<SessionData, StorageError>;

    async fn save(
        &self,
        headers: &mut HeaderMap,
        name: &str,
        session: &mut SessionData,
    ) -> Result<(), StorageError>;
}

pub type SharedStore = Arc<dyn SessionStore>;
