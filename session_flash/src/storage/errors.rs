use thiserror::Error;

use crate::utils::UtilError;

#[derive(Debug, Error, Clone)]
pub enum StorageError {
    #[error("Storage error: {0}")]
    Storage(String),

    /// An existing session was presented but could not be read back.
    #[error("Session decode error: {0}")]
    Decode(String),

    #[error("Json conversion(Serde) error: {0}")]
    Serde(String),

    #[error("Store configuration error: {0}")]
    Config(String),

    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}

impl From<redis::RedisError> for StorageError {
    fn from(err: redis::RedisError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}
