use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::json;
use session_flash_axum::{
    ActiveSession, Flashes, IncomingFlashes, SessionData, SessionState, SharedStore, with_session,
};

use crate::common::{Browser, all_stores};

async fn queue_saved(session: ActiveSession) -> &'static str {
    session.add_flash("success", "Saved!").await;
    "queued"
}

async fn queue_error_then_success(session: ActiveSession) -> &'static str {
    session.add_flash("error", "First problem").await;
    session.add_flash("success", "Partly saved").await;
    session.add_flash("error", "Second problem").await;
    "queued"
}

async fn queue_success_then_error(session: ActiveSession) -> &'static str {
    session.add_flash("success", "Partly saved").await;
    session.add_flash("error", "First problem").await;
    session.add_flash("error", "Second problem").await;
    "queued"
}

async fn show(IncomingFlashes(flashes): IncomingFlashes) -> Json<Flashes> {
    Json(flashes)
}

async fn show_twice(session: ActiveSession) -> Json<(Flashes, Flashes)> {
    let first = session.flash().await;
    let second = session.flash().await;
    Json((first, second))
}

async fn values(session: ActiveSession) -> Json<SessionData> {
    Json(session.data().await)
}

fn app(store: SharedStore) -> Router {
    let router = Router::new()
        .route("/save", post(queue_saved))
        .route("/error-then-success", post(queue_error_then_success))
        .route("/success-then-error", post(queue_success_then_error))
        .route("/show", get(show))
        .route("/show-twice", get(show_twice))
        .route("/values", get(values));
    with_session(router, SessionState::new(store).auto_save(true))
}

#[tokio::test]
async fn test_flash_survives_exactly_one_round_trip() {
    for (kind, store) in all_stores() {
        let app = app(store);
        let mut browser = Browser::new();

        // First request: no cookie, handler queues a message, session gets saved
        let visit = browser.send(&app, "POST", "/save").await;
        assert_eq!(visit.status, 200, "{kind}");
        assert!(visit.set_cookie.is_some(), "{kind}: new session with flash must be saved");

        // The persisted session holds the message under the reserved key
        let visit = browser.send(&app, "GET", "/values").await;
        assert_eq!(
            visit.json(),
            json!({"_flash_": {"success": ["Saved!"]}}),
            "{kind}"
        );

        // Second request: the page reads the message, session is written back
        let visit = browser.send(&app, "GET", "/show").await;
        assert_eq!(visit.json(), json!({"success": ["Saved!"]}), "{kind}");
        assert!(visit.set_cookie.is_some(), "{kind}: existing session must be saved");

        // The reserved key is gone from the stored session
        let visit = browser.send(&app, "GET", "/values").await;
        assert_eq!(visit.json(), json!({}), "{kind}");

        // And the message is not shown again
        let visit = browser.send(&app, "GET", "/show").await;
        assert_eq!(visit.json(), json!({}), "{kind}");
    }
}

#[tokio::test]
async fn test_flash_twice_in_one_request() {
    for (kind, store) in all_stores() {
        let app = app(store);
        let mut browser = Browser::new();
        browser.send(&app, "POST", "/save").await;

        let visit = browser.send(&app, "GET", "/show-twice").await;

        assert_eq!(
            visit.json(),
            json!([{"success": ["Saved!"]}, {}]),
            "{kind}"
        );
    }
}

#[tokio::test]
async fn test_categories_do_not_mix() {
    for uri in ["/error-then-success", "/success-then-error"] {
        for (kind, store) in all_stores() {
            let app = app(store);
            let mut browser = Browser::new();
            browser.send(&app, "POST", uri).await;

            let visit = browser.send(&app, "GET", "/show").await;

            assert_eq!(
                visit.json(),
                json!({
                    "error": ["First problem", "Second problem"],
                    "success": ["Partly saved"],
                }),
                "{kind} {uri}"
            );
        }
    }
}

#[tokio::test]
async fn test_messages_accumulate_until_shown() {
    for (kind, store) in all_stores() {
        let app = app(store);
        let mut browser = Browser::new();

        browser.send(&app, "POST", "/save").await;
        browser.send(&app, "POST", "/save").await;

        let visit = browser.send(&app, "GET", "/show").await;
        assert_eq!(
            visit.json(),
            json!({"success": ["Saved!", "Saved!"]}),
            "{kind}"
        );
    }
}

#[tokio::test]
async fn test_show_without_any_flash() {
    for (kind, store) in all_stores() {
        let app = app(store);
        let mut browser = Browser::new();

        let visit = browser.send(&app, "GET", "/show").await;

        assert_eq!(visit.status, 200, "{kind}");
        assert_eq!(visit.json(), json!({}), "{kind}");
        // Nothing was put in the new session, so nothing is stored
        assert!(visit.set_cookie.is_none(), "{kind}");
    }
}
