use std::fmt;
use std::sync::Arc;

use http::HeaderMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::config::ROOT_SESSION_NAME;
use crate::session::errors::SessionError;
use crate::session::types::{Flashes, SessionData};
use crate::storage::SharedStore;

/// Handle to the session of the request being served.
///
/// Cloning is cheap and every clone sees the same data, so the middleware and the
/// handler work on one session. A handle must not outlive its request.
#[derive(Clone)]
pub struct Session {
    store: SharedStore,
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    data: SessionData,
    /// Set by a successful save, cleared by every change after it.
    saved: bool,
}

impl Inner {
    fn changed(&mut self) -> &mut SessionData {
        self.saved = false;
        &mut self.data
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(store: SharedStore, data: SessionData) -> Self {
        Self {
            store,
            inner: Arc::new(Mutex::new(Inner { data, saved: false })),
        }
    }

    /// Loads (or creates) the `RootSession` for a request.
    ///
    /// A request without a session cookie gets a fresh session; an error means an
    /// existing session could not be decoded or the store is unavailable.
    pub async fn load(store: SharedStore, headers: &HeaderMap) -> Result<Self, SessionError> {
        let data = store.load(headers, ROOT_SESSION_NAME).await?;
        tracing::debug!(is_new = data.is_new(), "Loaded session");
        Ok(Self::new(store, data))
    }

    pub async fn is_new(&self) -> bool {
        self.inner.lock().await.data.is_new()
    }

    /// True once the session has been saved and left unchanged since.
    pub async fn is_saved(&self) -> bool {
        self.inner.lock().await.saved
    }

    /// Snapshot of the current session contents.
    pub async fn data(&self) -> SessionData {
        self.inner.lock().await.data.clone()
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SessionError> {
        self.inner.lock().await.data.get(key)
    }

    pub async fn insert<T: Serialize>(&self, key: &str, value: T) -> Result<(), SessionError> {
        self.inner.lock().await.changed().insert(key, value)
    }

    pub async fn remove(&self, key: &str) -> Option<Value> {
        self.inner.lock().await.changed().remove(key)
    }

    /// Queues a flash message for the next page render.
    pub async fn add_flash(&self, category: &str, message: impl Into<String>) {
        self.inner.lock().await.changed().add_flash(category, message);
    }

    /// Takes the queued flash messages so they are rendered only once.
    pub async fn flash(&self) -> Flashes {
        self.inner.lock().await.changed().take_flashes()
    }

    /// Persists the session, appending any `Set-Cookie` header to `headers`.
    ///
    /// Failures are logged and otherwise ignored: by the time a session is saved the
    /// response is already decided.
    ///
    /// With the auto-saving middleware in place this is rarely needed. If a handler
    /// does save, the middleware skips its own save unless the session changed
    /// afterwards, so the response carries a single session cookie.
    pub async fn save(&self, headers: &mut HeaderMap) {
        if let Err(e) = self.try_save(headers).await {
            tracing::error!(error = %e, "Failed to save session");
        }
    }

    /// Like [`save`](Self::save) but hands the error back.
    ///
    /// Returns `Ok(false)` when the session was new and nothing was put in it, in
    /// which case the store is not touched.
    pub async fn try_save(&self, headers: &mut HeaderMap) -> Result<bool, SessionError> {
        let mut inner = self.inner.lock().await;

        if !inner.data.should_persist() {
            tracing::debug!("Skipping save of new, empty session");
            return Ok(false);
        }

        self.store
            .save(headers, ROOT_SESSION_NAME, &mut inner.data)
            .await?;
        inner.saved = true;
        tracing::debug!("Saved session");
        Ok(true)
    }
}
