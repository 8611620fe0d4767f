use async_trait::async_trait;
use http::HeaderMap;

use crate::config::SESSION_COOKIE_MAX_AGE;
use crate::session::SessionData;
use crate::storage::cache_store::CacheBackend;
use crate::storage::config::session_expiry;
use crate::storage::errors::StorageError;
use crate::storage::types::{CacheData, SessionStore};
use crate::utils::{gen_random_string, get_cookie_value, header_set_cookie};

const SESSION_PREFIX: &str = "session";

/// Server-side session store: the cookie only carries a random session id and the
/// session itself lives in a [`CacheBackend`].
pub struct CacheSessionStore {
    backend: Box<dyn CacheBackend>,
    max_age: u64,
}

impl CacheSessionStore {
    pub fn new(backend: impl CacheBackend) -> Self {
        Self {
            backend: Box::new(backend),
            max_age: *SESSION_COOKIE_MAX_AGE,
        }
    }

    pub fn with_max_age(mut self, max_age: u64) -> Self {
        self.max_age = max_age;
        self
    }

    pub async fn init(&self) -> Result<(), StorageError> {
        self.backend.init().await
    }
}

#[async_trait]
impl SessionStore for CacheSessionStore {
    #[tracing::instrument(skip(self, headers))]
    async fn load(&self, headers: &HeaderMap, name: &str) -> Result<SessionData, StorageError> {
        let Some(session_id) = get_cookie_value(headers, name) else {
            tracing::debug!("No session cookie '{}' found, starting a new session", name);
            return Ok(SessionData::new());
        };

        let Some(cached) = self.backend.get(SESSION_PREFIX, &session_id).await? else {
            // Unknown or evicted id: hand out a fresh session with a fresh id on save.
            tracing::debug!("Session id not found in store, starting a new session");
            return Ok(SessionData::new());
        };

        let mut session = SessionData::try_from(cached)?;
        session.id = Some(session_id);
        Ok(session)
    }

    #[tracing::instrument(skip(self, headers, session))]
    async fn save(
        &self,
        headers: &mut HeaderMap,
        name: &str,
        session: &mut SessionData,
    ) -> Result<(), StorageError> {
        let session_id = match &session.id {
            Some(id) => id.clone(),
            None => gen_random_string(32)?,
        };

        // Validate the lifetime before anything is written to the backend
        let (expires_at, max_age) = session_expiry(self.max_age)?;
        let ttl = usize::try_from(self.max_age).map_err(|_| {
            StorageError::Config("Session max age too large for storage backend".to_string())
        })?;
        let data = CacheData::try_from(&*session)?;
        self.backend
            .put_with_ttl(SESSION_PREFIX, &session_id, data, ttl)
            .await?;

        header_set_cookie(headers, name, &session_id, expires_at, max_age)?;

        session.id = Some(session_id);
        session.is_new = false;
        Ok(())
    }
}
