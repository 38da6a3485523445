use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    models::Note,
    repository::{NoteStore, StoreError},
};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Request payload failed validation.
    #[error("{0}")]
    Validation(String),

    /// No note with the requested id exists.
    #[error("Note not found.")]
    NotFound,

    /// The backing store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, ServiceError> {
        let notes = self.store.load().await?;
        Ok(notes.into_iter().map(NoteResponse::from).collect())
    }

    pub async fn create_note(
        &self,
        request: CreateNoteRequest,
    ) -> Result<NoteResponse, ServiceError> {
        let (title, content) = validate_fields(
            request.title,
            request.content,
            "Title and content are required for a new note.",
        )?;

        let mut notes = self.store.load().await?;

        let note = Note {
            id: Uuid::now_v7().to_string(),
            title,
            content,
            created_at: Utc::now(),
            updated_at: None,
        };

        notes.push(note.clone());
        self.store.save(&notes).await?;

        Ok(note.into())
    }

    pub async fn update_note(
        &self,
        id: &str,
        request: UpdateNoteRequest,
    ) -> Result<NoteResponse, ServiceError> {
        let mut notes = self.store.load().await?;

        // An unknown id wins over a bad payload, matching the endpoint's
        // 404-before-400 contract.
        let index = notes
            .iter()
            .position(|note| note.id == id)
            .ok_or(ServiceError::NotFound)?;

        let (title, content) = validate_fields(
            request.title,
            request.content,
            "Title and content are required for updating a note.",
        )?;

        let note = &mut notes[index];
        note.title = title;
        note.content = content;
        note.updated_at = Some(Utc::now());
        let updated = note.clone();

        self.store.save(&notes).await?;

        Ok(updated.into())
    }

    pub async fn delete_note(&self, id: &str) -> Result<(), ServiceError> {
        let mut notes = self.store.load().await?;

        let initial_len = notes.len();
        notes.retain(|note| note.id != id);

        if notes.len() == initial_len {
            return Err(ServiceError::NotFound);
        }

        self.store.save(&notes).await?;

        Ok(())
    }
}

/// Both fields must be present and non-empty after trimming; the stored
/// values keep their original form.
fn validate_fields(
    title: Option<String>,
    content: Option<String>,
    message: &str,
) -> Result<(String, String), ServiceError> {
    match (title, content) {
        (Some(title), Some(content))
            if !title.trim().is_empty() && !content.trim().is_empty() =>
        {
            Ok((title, content))
        }
        _ => Err(ServiceError::Validation(message.to_string())),
    }
}
