use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("{0}")]
    Validation(String),

    #[error("Note {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Json(#[from] JsonRejection),

    #[error(transparent)]
    Path(#[from] PathRejection),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Body of every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl NoteError {
    pub fn status(&self) -> StatusCode {
        match self {
            NoteError::Validation(_) => StatusCode::BAD_REQUEST,
            NoteError::NotFound(_) => StatusCode::NOT_FOUND,
            NoteError::Json(rejection) => rejection.status(),
            NoteError::Path(rejection) => rejection.status(),
            NoteError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> String {
        match self {
            NoteError::Json(rejection) => rejection.body_text(),
            NoteError::Path(rejection) => rejection.body_text(),
            // never leak driver messages to clients
            NoteError::Database(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for NoteError {
    fn into_response(self) -> Response {
        if let NoteError::Database(e) = &self {
            log::error!("Database error: {}", e);
        }
        (self.status(), Json(ErrorBody { detail: self.detail() })).into_response()
    }
}
