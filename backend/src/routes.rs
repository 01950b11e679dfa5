use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::error::NoteError;
use crate::models::{Message, Note, NoteText};
use crate::AppState;

pub fn note_routes() -> Router<AppState> {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/:id", get(get_note).put(update_note).delete(delete_note))
}

pub async fn home() -> Json<Message> {
    Json(Message::new("Hello World"))
}

pub async fn about() -> Json<Message> {
    Json(Message::new("A small note-taking service backed by SQLite"))
}

async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, NoteError> {
    Ok(Json(state.store.list().await?))
}

async fn get_note(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Note>, NoteError> {
    let Path(id) = id?;
    Ok(Json(state.store.get(id).await?))
}

async fn create_note(
    State(state): State<AppState>,
    req: Result<Json<NoteText>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), NoteError> {
    let Json(req) = req?;
    let note = state.store.create(&req.text).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

async fn update_note(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    req: Result<Json<NoteText>, JsonRejection>,
) -> Result<Json<Note>, NoteError> {
    let Path(id) = id?;
    let Json(req) = req?;
    Ok(Json(state.store.update(id, &req.text).await?))
}

async fn delete_note(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Message>, NoteError> {
    let Path(id) = id?;
    state.store.delete(id).await?;
    Ok(Json(Message::new(format!("Note {} deleted", id))))
}
