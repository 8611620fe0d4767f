//! session_flash - Request-scoped sessions and one-time flash messages
//!
//! This crate loads a session for every request from a [`SessionStore`], lets
//! handlers read and write it through a [`Session`] handle, and saves it once the
//! response is decided. Flash messages are short, categorized notifications that
//! are queued during one request and handed out once on a later one.

mod config;
mod session;
mod storage;
mod utils;

use tokio::sync::OnceCell;

pub use config::{
    ROOT_SESSION_NAME, SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_SECURE, SESSION_STORE_TYPE,
};

pub use session::{FLASH_KEY, Flashes, Session, SessionData, SessionError};

pub use storage::{
    CacheBackend, CacheData, CacheSessionStore, CookieSessionStore, InMemoryCacheBackend,
    RedisCacheBackend, SessionStore, SharedStore, StorageError,
};

pub use utils::UtilError;

static SESSION_STORE: OnceCell<SharedStore> = OnceCell::const_new();

/// Initialize the session store configured through the environment.
///
/// Call once during startup, before serving requests. Later calls return the same
/// store without rebuilding it.
pub async fn init() -> Result<SharedStore, SessionError> {
    let store = SESSION_STORE
        .get_or_try_init(|| async { storage::store_from_env().await })
        .await?;
    Ok(store.clone())
}
