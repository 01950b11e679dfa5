pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod validation;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};

use crate::db::NoteStore;

pub const BODY_LIMIT: usize = 2 * 1024 * 1024;

pub type AppState = Arc<AppData>;

pub struct AppData {
    pub store: NoteStore,
}

/// Full HTTP surface: info routes at the root, the note API under `/db`.
pub fn app(store: NoteStore) -> Router {
    let state = AppState::new(AppData { store });

    Router::new()
        .route("/", get(routes::home))
        .route("/about", get(routes::about))
        .nest("/db", routes::note_routes())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
