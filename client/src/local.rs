use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::models::{Note, NoteId};
use crate::store::{NoteStore, StoreError};

/// In-memory store for running without a backend.
///
/// Ids come from a counter, so deleting a note never shifts the identity
/// of the others.
pub struct LocalNoteStore {
    notes: Mutex<Vec<Note>>,
    next_id: AtomicI64,
    reject_empty: bool,
}

impl Default for LocalNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalNoteStore {
    pub fn new() -> Self {
        Self {
            notes: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            reject_empty: false,
        }
    }

    /// Refuse blank text the way the server does by default.
    pub fn rejecting_empty(mut self) -> Self {
        self.reject_empty = true;
        self
    }

    fn check(&self, text: &str) -> Result<(), StoreError> {
        if self.reject_empty && text.trim().is_empty() {
            return Err(StoreError::Validation {
                detail: "Text must not be empty".to_string(),
            });
        }
        Ok(())
    }

    fn not_found(id: NoteId) -> StoreError {
        StoreError::NotFound { detail: format!("Note {} not found", id) }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Note>> {
        // a poisoned list is still a consistent list
        self.notes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl NoteStore for LocalNoteStore {
    async fn list_notes(&self) -> Result<Vec<Note>, StoreError> {
        Ok(self.lock().clone())
    }

    async fn create_note(&self, text: &str) -> Result<Note, StoreError> {
        self.check(text)?;
        let note = Note {
            id: NoteId(self.next_id.fetch_add(1, Ordering::Relaxed)),
            text: text.to_string(),
            date: Utc::now(),
        };
        self.lock().push(note.clone());
        Ok(note)
    }

    async fn update_note(&self, id: NoteId, text: &str) -> Result<Note, StoreError> {
        self.check(text)?;
        let mut notes = self.lock();
        let note = notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        note.text = text.to_string();
        note.date = Utc::now();
        Ok(note.clone())
    }

    async fn delete_note(&self, id: NoteId) -> Result<(), StoreError> {
        let mut notes = self.lock();
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}
