mod cache_session_store;
mod cache_store;
mod config;
mod cookie_store;
mod errors;
mod types;

pub use cache_session_store::CacheSessionStore;
pub use cache_store::{CacheBackend, InMemoryCacheBackend, RedisCacheBackend};
pub use cookie_store::CookieSessionStore;
pub use errors::StorageError;
pub use types::{CacheData, SessionStore, SharedStore};

pub(crate) use config::store_from_env;
