//! Client-side session store
//!
//! The whole session travels in the cookie as `<payload>.<signature>`, where the
//! payload is the base64url encoded JSON of the session and the signature is an
//! HMAC-SHA256 over the cookie name and the payload. Binding the name into the MAC
//! keeps a value issued for one cookie from being replayed under another.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use http::HeaderMap;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::{SESSION_COOKIE_MAX_AGE, SESSION_SECRET};
use crate::session::SessionData;
use crate::storage::config::session_expiry;
use crate::storage::errors::StorageError;
use crate::storage::types::SessionStore;
use crate::utils::{base64url_decode, base64url_encode, get_cookie_value, header_set_cookie};

type HmacSha256 = Hmac<Sha256>;

/// Browsers drop cookies larger than this.
const MAX_COOKIE_VALUE_LEN: usize = 4096;

pub struct CookieSessionStore {
    secret: Vec<u8>,
    max_age: u64,
}

impl CookieSessionStore {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            max_age: *SESSION_COOKIE_MAX_AGE,
        }
    }

    /// Builds the store from `SESSION_SECRET`.
    pub fn from_env() -> Self {
        Self::new(SESSION_SECRET.clone())
    }

    pub fn with_max_age(mut self, max_age: u64) -> Self {
        self.max_age = max_age;
        self
    }

    fn sign(&self, name: &str, payload: &str) -> Result<Vec<u8>, StorageError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| StorageError::Config(e.to_string()))?;
        mac.update(name.as_bytes());
        mac.update(b"|");
        mac.update(payload.as_bytes());
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn encode(&self, name: &str, session: &SessionData) -> Result<String, StorageError> {
        let payload = base64url_encode(&serde_json::to_vec(session)?);
        let signature = base64url_encode(&self.sign(name, &payload)?);
        let value = format!("{payload}.{signature}");

        if value.len() > MAX_COOKIE_VALUE_LEN {
            return Err(StorageError::Storage(format!(
                "Encoded session is {} bytes, cookies are limited to {MAX_COOKIE_VALUE_LEN}",
                value.len()
            )));
        }
        Ok(value)
    }

    fn decode(&self, name: &str, value: &str) -> Result<SessionData, StorageError> {
        let (payload, signature) = value
            .split_once('.')
            .ok_or_else(|| StorageError::Decode("Malformed session cookie".to_string()))?;

        let signature = base64url_decode(signature)
            .map_err(|_| StorageError::Decode("Malformed session signature".to_string()))?;
        let expected = self.sign(name, payload)?;
        if !bool::from(signature.ct_eq(&expected)) {
            return Err(StorageError::Decode(
                "Session cookie signature mismatch".to_string(),
            ));
        }

        let json = base64url_decode(payload)
            .map_err(|_| StorageError::Decode("Malformed session payload".to_string()))?;
        serde_json::from_slice(&json).map_err(|e| StorageError::Decode(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for CookieSessionStore {
    #[tracing::instrument(skip(self, headers))]
    async fn load(&self, headers: &HeaderMap, name: &str) -> Result<SessionData, StorageError> {
        let Some(value) = get_cookie_value(headers, name) else {
            tracing::debug!("No session cookie '{}' found, starting a new session", name);
            return Ok(SessionData::new());
        };

        self.decode(name, &value)
    }

    #[tracing::instrument(skip(self, headers, session))]
    async fn save(
        &self,
        headers: &mut HeaderMap,
        name: &str,
        session: &mut SessionData,
    ) -> Result<(), StorageError> {
        let (expires_at, max_age) = session_expiry(self.max_age)?;
        let value = self.encode(name, session)?;
        header_set_cookie(headers, name, &value, expires_at, max_age)?;
        session.is_new = false;
        Ok(())
    }
}
