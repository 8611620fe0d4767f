use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Key '{0}' is reserved for flash messages")]
    ReservedKey(String),

    #[error("Json conversion(Serde) error: {0}")]
    Serde(String),

    /// The request never passed through the session middleware.
    #[error("No session attached to the request, is the session middleware installed?")]
    MissingMiddleware,
}
