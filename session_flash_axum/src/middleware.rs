use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{Next, from_fn_with_state},
    response::{IntoResponse, Response},
};

use session_flash::{Session, SharedStore};

use super::config::{SESSION_AUTO_SAVE, SESSION_LOAD_FAILURE_MESSAGE};

/// State of the [`load_session`] middleware.
#[derive(Clone)]
pub struct SessionState {
    store: SharedStore,
    auto_save: bool,
}

impl SessionState {
    /// Auto-save follows `SESSION_AUTO_SAVE` (on unless set to "false").
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            auto_save: *SESSION_AUTO_SAVE,
        }
    }

    /// When off, handlers are responsible for calling [`Session::save`].
    pub fn auto_save(mut self, auto_save: bool) -> Self {
        self.auto_save = auto_save;
        self
    }
}

/// Loads the session of every request and attaches it to the request extensions.
///
/// Use with [`axum::middleware::from_fn_with_state`] or [`with_session`]. If the
/// session cannot be loaded the request fails with a 500 and the wrapped handler
/// is not called.
pub async fn load_session(
    State(state): State<SessionState>,
    mut req: Request,
    next: Next,
) -> Response {
    let session = match Session::load(state.store.clone(), req.headers()).await {
        Ok(session) => session,
        Err(err) => {
            // A missing cookie is not an error; this is a session that exists but
            // cannot be decoded, or a store that is unreachable.
            tracing::error!(error = %err, "Failed to load session");
            return (StatusCode::INTERNAL_SERVER_ERROR, SESSION_LOAD_FAILURE_MESSAGE)
                .into_response();
        }
    };

    req.extensions_mut().insert(session.clone());
    let mut response = next.run(req).await;

    // A handler that already saved gets no second session cookie.
    if state.auto_save && !session.is_saved().await {
        session.save(response.headers_mut()).await;
    }
    response
}

/// Wraps every route of `router` with [`load_session`].
pub fn with_session<S>(router: Router<S>, state: SessionState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(from_fn_with_state(state, load_session))
}
