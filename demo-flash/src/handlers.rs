use askama::Template;
use axum::{
    Form,
    http::StatusCode,
    response::{Html, Redirect},
};
use serde::Deserialize;

use session_flash_axum::{ActiveSession, IncomingFlashes, IntoResponseError};

const LAST_NOTE_KEY: &str = "last_note";

#[derive(Template)]
#[template(path = "index.html.j2")]
struct IndexTemplate {
    flashes: Vec<(String, Vec<String>)>,
    last_note: Option<String>,
}

pub(crate) async fn index(
    session: ActiveSession,
    IncomingFlashes(flashes): IncomingFlashes,
) -> Result<Html<String>, (StatusCode, String)> {
    let last_note = session.get::<String>(LAST_NOTE_KEY).await.into_response_error()?;

    let template = IndexTemplate {
        flashes: flashes.into_iter().collect(),
        last_note,
    };
    let html = Html(
        template
            .render()
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?,
    );
    Ok(html)
}

#[derive(Deserialize)]
pub(crate) struct NoteForm {
    note: String,
}

pub(crate) async fn save(
    session: ActiveSession,
    Form(form): Form<NoteForm>,
) -> Result<Redirect, (StatusCode, String)> {
    let note = form.note.trim();
    if note.is_empty() {
        session.add_flash("error", "A note cannot be empty").await;
        return Ok(Redirect::to("/"));
    }

    session
        .insert(LAST_NOTE_KEY, note)
        .await
        .into_response_error()?;
    session.add_flash("success", "Saved!").await;
    tracing::debug!("Saved note of {} bytes", note.len());
    Ok(Redirect::to("/"))
}
