use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: i64,
    pub text: String,
    /// Time of the last write, stamped by the store.
    pub date: DateTime<Utc>,
}

/// Request body for both create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteText {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
