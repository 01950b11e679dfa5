use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Note, NoteId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{detail}")]
    Validation { detail: String },

    #[error("{detail}")]
    NotFound { detail: String },

    #[error("server responded with {status}: {detail}")]
    Rejected { status: u16, detail: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl StoreError {
    /// Message suitable for showing to the user.
    pub fn detail(&self) -> String {
        match self {
            StoreError::Validation { detail }
            | StoreError::NotFound { detail }
            | StoreError::Rejected { detail, .. } => detail.clone(),
            StoreError::Transport(e) => e.to_string(),
        }
    }
}

/// Authoritative note collection as seen from the client.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn list_notes(&self) -> Result<Vec<Note>, StoreError>;

    async fn create_note(&self, text: &str) -> Result<Note, StoreError>;

    async fn update_note(&self, id: NoteId, text: &str) -> Result<Note, StoreError>;

    async fn delete_note(&self, id: NoteId) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: NoteStore + ?Sized> NoteStore for Box<S> {
    async fn list_notes(&self) -> Result<Vec<Note>, StoreError> {
        (**self).list_notes().await
    }

    async fn create_note(&self, text: &str) -> Result<Note, StoreError> {
        (**self).create_note(text).await
    }

    async fn update_note(&self, id: NoteId, text: &str) -> Result<Note, StoreError> {
        (**self).update_note(id, text).await
    }

    async fn delete_note(&self, id: NoteId) -> Result<(), StoreError> {
        (**self).delete_note(id).await
    }
}
