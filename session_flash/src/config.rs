//! Central configuration for the session_flash crate

use std::env;
use std::sync::LazyLock;

/// Name of the session every request is bound to.
pub const ROOT_SESSION_NAME: &str = "RootSession";

/// Backing store for sessions: "cookie", "memory" or "redis".
/// Default: "cookie"
pub static SESSION_STORE_TYPE: LazyLock<String> =
    LazyLock::new(|| parse_store_type(env::var("SESSION_STORE_TYPE").ok().as_deref()));

/// Connection URL, only used by the "redis" store.
pub static SESSION_STORE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("SESSION_STORE_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
});

pub static SESSION_COOKIE_MAX_AGE: LazyLock<u64> =
    LazyLock::new(|| parse_max_age(env::var("SESSION_COOKIE_MAX_AGE").ok().as_deref()));

pub static SESSION_COOKIE_SECURE: LazyLock<bool> =
    LazyLock::new(|| parse_secure(env::var("SESSION_COOKIE_SECURE").ok().as_deref()));

pub(crate) static SESSION_SECRET: LazyLock<Vec<u8>> =
    LazyLock::new(|| match env::var("SESSION_SECRET") {
        Ok(secret) => secret.into_bytes(),
        Err(_) => {
            tracing::warn!("SESSION_SECRET not set, using the built-in development secret");
            "default_session_secret_change_in_production"
                .to_string()
                .into_bytes()
        }
    });

fn parse_store_type(val: Option<&str>) -> String {
    val.unwrap_or("cookie").to_string()
}

fn parse_max_age(val: Option<&str>) -> u64 {
    val.and_then(|s| s.parse().ok()).unwrap_or(86400) // Default to one day if not set or invalid
}

fn parse_secure(val: Option<&str>) -> bool {
    val.map(|val| val.to_lowercase() != "false").unwrap_or(true)
}
