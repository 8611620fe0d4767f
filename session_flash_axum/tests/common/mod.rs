use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Request, Response,
        header::{COOKIE, SET_COOKIE},
    },
};
use session_flash_axum::{
    CacheSessionStore, CookieSessionStore, InMemoryCacheBackend, ROOT_SESSION_NAME, SharedStore,
};
use tower::ServiceExt;

/// Initialize tracing for tests
pub fn init_test_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok(); // Ignore errors if already initialized
    });
}

pub fn cookie_store() -> SharedStore {
    Arc::new(CookieSessionStore::new("integration-test-secret").with_max_age(300))
}

pub fn memory_store() -> SharedStore {
    Arc::new(CacheSessionStore::new(InMemoryCacheBackend::new()).with_max_age(300))
}

/// Every store flavour the flows should behave the same on.
pub fn all_stores() -> Vec<(&'static str, SharedStore)> {
    vec![("cookie", cookie_store()), ("memory", memory_store())]
}

/// Minimal cookie jar holding the session cookie between requests.
#[derive(Default)]
pub struct Browser {
    session_cookie: Option<String>,
}

impl Browser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_cookie(&self) -> Option<&str> {
        self.session_cookie.as_deref()
    }

    pub fn set_session_cookie(&mut self, value: impl Into<String>) {
        self.session_cookie = Some(value.into());
    }

    /// Sends a request and returns status, Set-Cookie presence and body text.
    pub async fn send(&mut self, app: &Router, method: &str, uri: &str) -> Visit {
        init_test_tracing();

        let mut request = Request::builder().method(method).uri(uri);
        if let Some(value) = &self.session_cookie {
            request = request.header(COOKIE, format!("{ROOT_SESSION_NAME}={value}"));
        }
        let request = request.body(Body::empty()).unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        self.visit(response).await
    }

    async fn visit(&mut self, response: Response<Body>) -> Visit {
        let status = response.status().as_u16();
        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string());
        let set_cookie_count = response.headers().get_all(SET_COOKIE).iter().count();

        if let Some(header) = &set_cookie {
            let pair = header.split(';').next().unwrap();
            let (name, value) = pair.split_once('=').unwrap();
            assert_eq!(name, ROOT_SESSION_NAME);
            self.session_cookie = Some(value.to_string());
        }

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        Visit {
            status,
            set_cookie,
            set_cookie_count,
            body: String::from_utf8(body.to_vec()).unwrap(),
        }
    }
}

pub struct Visit {
    pub status: u16,
    pub set_cookie: Option<String>,
    pub set_cookie_count: usize,
    pub body: String,
}

impl Visit {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}
