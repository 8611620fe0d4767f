//! Configuration for the session_flash_axum crate

use std::sync::LazyLock;

/// Plain-text body sent when the session of a request cannot be loaded.
pub const SESSION_LOAD_FAILURE_MESSAGE: &str = "Failed to load session, check logs for details";

/// Whether the middleware saves the session after the handler returns.
/// Default: true
pub static SESSION_AUTO_SAVE: LazyLock<bool> = LazyLock::new(|| {
    std::env::var("SESSION_AUTO_SAVE")
        .map(|val| parse_auto_save(&val))
        .unwrap_or(true)
});

fn parse_auto_save(val: &str) -> bool {
    val.to_lowercase() != "false"
}
