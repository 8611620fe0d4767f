//! session_flash_axum - Axum integration for session_flash
//!
//! Install [`load_session`] on a router (directly or through [`with_session`]) and
//! handlers can take an [`ActiveSession`] or [`IncomingFlashes`] extractor.

mod config;
mod error;
mod middleware;
mod session;

pub use config::{SESSION_AUTO_SAVE, SESSION_LOAD_FAILURE_MESSAGE};
pub use error::IntoResponseError;
pub use middleware::{SessionState, load_session, with_session};
pub use session::{ActiveSession, IncomingFlashes, MissingSessionLayer, session_from_extensions};

// Re-export the core types and initialization function from session_flash crate
pub use session_flash::{
    CacheSessionStore, CookieSessionStore, Flashes, InMemoryCacheBackend, ROOT_SESSION_NAME,
    SESSION_COOKIE_SECURE, Session, SessionData, SessionError, SessionStore, SharedStore, init,
};
