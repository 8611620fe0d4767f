//! One-time flash messages
//!
//! Messages queued during one request are persisted with the session and handed
//! out once, typically to the next page render, after which they are gone.

use super::types::{Flashes, SessionData};

impl SessionData {
    /// Queues `message` under `category` for display at the next page render.
    ///
    /// Only the in-memory session changes; it is persisted when the session is saved.
    pub fn add_flash(&mut self, category: &str, message: impl Into<String>) {
        self.flash
            .get_or_insert_with(Flashes::new)
            .push(category, message.into());
    }

    /// Takes all queued flash messages out of the session.
    ///
    /// Returns an empty map when nothing was queued, so the result can always be
    /// iterated. Later calls in the same request see nothing until new messages
    /// are added.
    pub fn take_flashes(&mut self) -> Flashes {
        self.flash.take().unwrap_or_default()
    }
}
