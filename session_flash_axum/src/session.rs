use std::ops::Deref;

use axum::{
    extract::FromRequestParts,
    http::{Extensions, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};

use session_flash::{Flashes, Session, SessionError};

/// Returns the session attached by the session middleware.
///
/// `None` means the middleware is not installed on this route, which is a wiring
/// bug rather than a runtime condition.
pub fn session_from_extensions(extensions: &Extensions) -> Option<Session> {
    extensions.get::<Session>().cloned()
}

/// Rejection for session extractors used on a route without the session middleware.
#[derive(Debug)]
pub struct MissingSessionLayer;

impl IntoResponse for MissingSessionLayer {
    fn into_response(self) -> Response {
        tracing::error!("{}", SessionError::MissingMiddleware);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            SessionError::MissingMiddleware.to_string(),
        )
            .into_response()
    }
}

/// The session of the current request, available as an Axum extractor
///
/// # Example
///
/// ```no_run
/// use axum::{routing::post, Router};
/// use session_flash_axum::ActiveSession;
///
/// async fn save_settings(session: ActiveSession) -> &'static str {
///     session.add_flash("success", "Settings saved").await;
///     "ok"
/// }
///
/// let app: Router = Router::new().route("/settings", post(save_settings));
/// ```
#[derive(Clone, Debug)]
pub struct ActiveSession(pub Session);

impl Deref for ActiveSession {
    type Target = Session;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for ActiveSession
where
    S: Send + Sync,
{
    type Rejection = MissingSessionLayer;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        session_from_extensions(&parts.extensions)
            .map(ActiveSession)
            .ok_or(MissingSessionLayer)
    }
}

/// Flash messages queued for this request, taken out of the session on extraction.
#[derive(Clone, Debug)]
pub struct IncomingFlashes(pub Flashes);

impl<S> FromRequestParts<S> for IncomingFlashes
where
    S: Send + Sync,
{
    type Rejection = MissingSessionLayer;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ActiveSession(session) = ActiveSession::from_request_parts(parts, state).await?;
        Ok(IncomingFlashes(session.flash().await))
    }
}
