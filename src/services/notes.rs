//! Notes service
//!
//! High-level business logic for the note lifecycle: create, edit,
//! pin, trash/restore, hard delete, folder reassignment, and the
//! collaborator entry points (transcript append, summary setter).

use crate::database::{CreateNoteRequest, Note, Repository, UpdateNoteRequest};
use crate::error::Result;
use crate::query::{self, NoteScope};

/// Service for managing notes
#[derive(Clone)]
pub struct NotesService {
    repo: Repository,
}

impl NotesService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Create a new note, optionally filed in a folder
    pub async fn create_note(
        &self,
        title: String,
        content: String,
        folder_id: Option<String>,
    ) -> Result<Note> {
        tracing::info!("Creating new note: {:?}", title);

        let req = CreateNoteRequest {
            title,
            content,
            folder_id,
        };

        let note = self.repo.create_note(req).await?;

        tracing::info!("Note created successfully: {}", note.id);

        Ok(note)
    }

    /// Get a note by ID
    pub async fn get_note(&self, id: &str) -> Result<Note> {
        self.repo.get_note(id).await
    }

    /// List notes for a sidebar selection
    pub async fn list_notes(&self, scope: &NoteScope) -> Result<Vec<Note>> {
        match scope {
            NoteScope::All => self.repo.list_active_notes(None).await,
            NoteScope::Trash => self.repo.list_trashed_notes().await,
            NoteScope::Folder(folder_id) => self.repo.list_active_notes(Some(folder_id)).await,
        }
    }

    /// Edit a note's title and/or content.
    ///
    /// Always refreshes `updated_at`, even when the new values equal
    /// the current ones.
    pub async fn edit(
        &self,
        id: String,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Note> {
        tracing::debug!("Editing note: {}", id);

        let req = UpdateNoteRequest { id, title, content };

        let note = self.repo.update_note(req).await?;

        tracing::debug!("Note updated successfully: {}", note.id);

        Ok(note)
    }

    /// Flip the pinned flag. Leaves `updated_at` untouched.
    pub async fn toggle_pin(&self, id: &str) -> Result<Note> {
        let note = self.repo.get_note(id).await?;
        self.repo.set_pinned(id, !note.pinned).await
    }

    /// Move a note to the trash
    pub async fn trash(&self, id: &str) -> Result<Note> {
        tracing::info!("Trashing note: {}", id);
        self.repo.trash_note(id).await
    }

    /// Bring a note back from the trash
    pub async fn restore(&self, id: &str) -> Result<Note> {
        tracing::info!("Restoring note: {}", id);
        self.repo.restore_note(id).await
    }

    /// Permanently delete a note. The UI only offers this from the
    /// trash view; the operation itself does not require it.
    pub async fn hard_delete(&self, id: &str) -> Result<()> {
        tracing::info!("Permanently deleting note: {}", id);
        self.repo.hard_delete_note(id).await
    }

    /// File a note under a folder, or unfile it with `None`
    pub async fn reassign_folder(&self, id: &str, folder_id: Option<&str>) -> Result<Note> {
        self.repo.set_folder(id, folder_id).await
    }

    /// Store or clear an assistant-generated summary
    pub async fn set_summary(&self, id: &str, summary: Option<&str>) -> Result<Note> {
        self.repo.set_summary(id, summary).await
    }

    /// Completion callback for the speech-to-text collaborator:
    /// appends the transcript to the note's content via edit semantics.
    pub async fn append_transcript(&self, id: &str, transcript: &str) -> Result<Note> {
        let note = self.repo.get_note(id).await?;
        let content = format!("{}{}", note.content, transcript);
        self.edit(id.to_string(), None, Some(content)).await
    }

    /// Search notes within a scope by title or content
    pub async fn search_notes(&self, scope: &NoteScope, query: &str) -> Result<Vec<Note>> {
        let notes = self.list_notes(scope).await?;
        Ok(query::search_notes(notes, query))
    }
}
