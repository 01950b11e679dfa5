use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use crate::models::{Note, NoteId, NoteText};
use crate::store::{NoteStore, StoreError};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/db/notes";

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Note store reached over the JSON API.
pub struct HttpNoteStore {
    client: Client,
    base_url: String,
}

impl HttpNoteStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn note_url(&self, id: NoteId) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

// Turns a non-2xx response into the matching error, reading `detail` from the body
async fn check(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    let detail = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.detail)
        .unwrap_or_else(|_| {
            status.canonical_reason().unwrap_or("Request failed").to_string()
        });

    Err(match status {
        StatusCode::NOT_FOUND => StoreError::NotFound { detail },
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            StoreError::Validation { detail }
        }
        _ => StoreError::Rejected { status: status.as_u16(), detail },
    })
}

#[async_trait]
impl NoteStore for HttpNoteStore {
    async fn list_notes(&self) -> Result<Vec<Note>, StoreError> {
        let response = self.client.get(&self.base_url).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn create_note(&self, text: &str) -> Result<Note, StoreError> {
        let response = self.client
            .post(&self.base_url)
            .json(&NoteText { text })
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn update_note(&self, id: NoteId, text: &str) -> Result<Note, StoreError> {
        let response = self.client
            .put(self.note_url(id))
            .json(&NoteText { text })
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn delete_note(&self, id: NoteId) -> Result<(), StoreError> {
        let response = self.client.delete(self.note_url(id)).send().await?;
        check(response).await?;
        Ok(())
    }
}
