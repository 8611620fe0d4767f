use axum::http::StatusCode;
use session_flash::{SessionError, StorageError};

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Maps session errors raised inside handlers to status codes
impl<T> IntoResponseError<T> for Result<T, SessionError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match e {
                SessionError::ReservedKey(_) => StatusCode::BAD_REQUEST,
                SessionError::Serde(_) => StatusCode::BAD_REQUEST,
                SessionError::Storage(StorageError::Decode(_)) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            tracing::debug!(status = %status, error = %e, "Session error in handler");
            (status, e.to_string())
        })
    }
}
