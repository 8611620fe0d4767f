use axum::{
    Router,
    routing::{get, post},
};
use session_flash_axum::{SESSION_COOKIE_SECURE, SessionState, with_session};

mod handlers;
mod server;

use crate::{
    handlers::{index, save},
    server::{init_tracing, spawn_http_server},
};

/// Demo defaults: the server speaks plain HTTP, so the session cookie must not be `Secure`.
const DEMO_ENV_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/.env");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    dotenvy::from_path(DEMO_ENV_FILE).ok();
    init_tracing("demo_flash");

    if *SESSION_COOKIE_SECURE {
        tracing::warn!(
            "SESSION_COOKIE_SECURE is on but the demo serves plain HTTP; browsers will drop the session cookie outside localhost"
        );
    }

    // Build the session store once, before serving anything
    let store = session_flash_axum::init().await?;

    let router = Router::new()
        .route("/", get(index))
        .route("/save", post(save));
    let app = with_session(router, SessionState::new(store));

    spawn_http_server(3001, app).await?;
    Ok(())
}
