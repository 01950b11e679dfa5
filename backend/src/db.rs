use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::NoteError;
use crate::models::Note;
use crate::validation::TextRules;

// AUTOINCREMENT keeps ids of deleted notes from being handed out again
const CREATE_NOTES_TABLE: &str = "CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL,
    date TEXT NOT NULL
)";

/// Opens the pool and makes sure the `notes` table exists.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        // an in-memory database lives only as long as its connection
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    sqlx::query(CREATE_NOTES_TABLE).execute(&pool).await?;

    Ok(pool)
}

/// The authoritative note collection.
#[derive(Clone)]
pub struct NoteStore {
    db: SqlitePool,
    rules: TextRules,
}

impl NoteStore {
    pub fn new(db: SqlitePool, rules: TextRules) -> Self {
        Self { db, rules }
    }

    pub async fn list(&self) -> Result<Vec<Note>, NoteError> {
        let notes = sqlx::query_as::<_, Note>(
            "SELECT id, text, date FROM notes ORDER BY date DESC, id DESC",
        )
            .fetch_all(&self.db)
            .await?;
        Ok(notes)
    }

    pub async fn get(&self, id: i64) -> Result<Note, NoteError> {
        sqlx::query_as::<_, Note>("SELECT id, text, date FROM notes WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(NoteError::NotFound(id))
    }

    pub async fn create(&self, text: &str) -> Result<Note, NoteError> {
        self.rules.check(text).map_err(NoteError::Validation)?;

        let note = sqlx::query_as::<_, Note>(
            "INSERT INTO notes (text, date) VALUES (?1, ?2) RETURNING id, text, date",
        )
            .bind(text)
            .bind(Utc::now())
            .fetch_one(&self.db)
            .await?;

        log::info!("Created note {}", note.id);
        Ok(note)
    }

    pub async fn update(&self, id: i64, text: &str) -> Result<Note, NoteError> {
        self.rules.check(text).map_err(NoteError::Validation)?;

        let note = sqlx::query_as::<_, Note>(
            "UPDATE notes SET text = ?1, date = ?2 WHERE id = ?3 RETURNING id, text, date",
        )
            .bind(text)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(NoteError::NotFound(id))?;

        log::info!("Updated note {}", note.id);
        Ok(note)
    }

    pub async fn delete(&self, id: i64) -> Result<(), NoteError> {
        let deleted = sqlx::query("DELETE FROM notes WHERE id = ?1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(NoteError::NotFound(id));
        }

        log::info!("Deleted note {}", id);
        Ok(())
    }
}
