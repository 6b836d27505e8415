//! Repository layer for database operations
//!
//! CRUD operations for folders, notes, and attachments. Every mutation
//! emits a [`StoreEvent`] before returning, so observers never see a
//! stale projection after a call completes. Cascade deletes (folder ->
//! notes, note -> attachments) are enforced by the schema's foreign
//! keys and are atomic with the owning delete.

use super::events::{EventBus, StoreEvent};
use super::models::*;
use crate::config;
use crate::error::{AppError, Result};
use chrono::Utc;
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
    events: EventBus,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            events: EventBus::new(),
        }
    }

    /// Subscribe to store change events
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    // ===== Folders =====

    /// Create a new folder. Names are free text with no uniqueness
    /// constraint; a missing icon falls back to the default.
    pub async fn create_folder(&self, name: &str, icon: Option<&str>) -> Result<Folder> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let icon = icon.unwrap_or(config::DEFAULT_FOLDER_ICON);

        let folder = sqlx::query_as::<_, Folder>(
            r#"
            INSERT INTO folders (id, name, icon, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(name)
        .bind(icon)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created folder: {}", id);
        self.events.emit(StoreEvent::FolderCreated { id });
        Ok(folder)
    }

    /// Get a folder by ID
    pub async fn get_folder(&self, id: &str) -> Result<Folder> {
        let folder = sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::FolderNotFound(id.to_string()))?;

        Ok(folder)
    }

    /// List all folders, oldest first (sidebar order)
    pub async fn list_folders(&self) -> Result<Vec<Folder>> {
        let folders =
            sqlx::query_as::<_, Folder>("SELECT * FROM folders ORDER BY created_at ASC, id ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(folders)
    }

    /// Rename a folder
    pub async fn rename_folder(&self, id: &str, name: &str) -> Result<Folder> {
        let rows = sqlx::query("UPDATE folders SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::FolderNotFound(id.to_string()));
        }

        self.events.emit(StoreEvent::FolderRenamed { id: id.to_string() });
        self.get_folder(id).await
    }

    /// Delete a folder and every note referencing it.
    ///
    /// The cascade is a hard delete and applies to trashed notes too.
    /// It runs inside one transaction, so observers never see a note
    /// whose folder is gone.
    pub async fn delete_folder(&self, id: &str) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let cascaded_notes: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE folder_id = ?")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        let rows = sqlx::query("DELETE FROM folders WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::FolderNotFound(id.to_string()));
        }

        tx.commit().await?;

        let cascaded_notes = cascaded_notes as u64;
        tracing::debug!("Deleted folder: {} ({} notes cascaded)", id, cascaded_notes);
        self.events.emit(StoreEvent::FolderDeleted {
            id: id.to_string(),
            cascaded_notes,
        });
        Ok(cascaded_notes)
    }

    // ===== Notes =====

    /// Create a new note
    pub async fn create_note(&self, req: CreateNoteRequest) -> Result<Note> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (id, title, content, created_at, updated_at, pinned, folder_id)
            VALUES (?, ?, ?, ?, ?, 0, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(&req.title)
        .bind(&req.content)
        .bind(now)
        .bind(now)
        .bind(&req.folder_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created note: {}", id);
        self.events.emit(StoreEvent::NoteCreated { id });
        Ok(note)
    }

    /// Get a note by ID, regardless of trash state
    pub async fn get_note(&self, id: &str) -> Result<Note> {
        let note = sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NoteNotFound(id.to_string()))?;

        Ok(note)
    }

    /// List active (non-trashed) notes, optionally scoped to one folder.
    ///
    /// Ordered by `updated_at` descending with `id` ascending as the
    /// tie-break, so equal timestamps still list deterministically.
    pub async fn list_active_notes(&self, folder_id: Option<&str>) -> Result<Vec<Note>> {
        let notes = match folder_id {
            Some(folder_id) => {
                sqlx::query_as::<_, Note>(
                    r#"
                    SELECT * FROM notes
                    WHERE deleted_at IS NULL AND folder_id = ?
                    ORDER BY updated_at DESC, id ASC
                    "#,
                )
                .bind(folder_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Note>(
                    r#"
                    SELECT * FROM notes
                    WHERE deleted_at IS NULL
                    ORDER BY updated_at DESC, id ASC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(notes)
    }

    /// List trashed notes across all folders
    pub async fn list_trashed_notes(&self) -> Result<Vec<Note>> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT * FROM notes
            WHERE deleted_at IS NOT NULL
            ORDER BY updated_at DESC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }

    /// Update a note's title and/or content.
    ///
    /// `updated_at` is refreshed unconditionally, even when the new
    /// values equal the old ones. Works on trashed notes too.
    pub async fn update_note(&self, req: UpdateNoteRequest) -> Result<Note> {
        let now = Utc::now();

        // Build dynamic update query
        let mut query = "UPDATE notes SET updated_at = ?".to_string();
        let mut params: Vec<String> = vec![now.to_rfc3339()];

        if let Some(title) = &req.title {
            query.push_str(", title = ?");
            params.push(title.clone());
        }

        if let Some(content) = &req.content {
            query.push_str(", content = ?");
            params.push(content.clone());
        }

        query.push_str(" WHERE id = ?");
        params.push(req.id.clone());

        let mut q = sqlx::query(&query);
        for param in &params {
            q = q.bind(param);
        }

        let rows_affected = q.execute(&self.pool).await?.rows_affected();

        if rows_affected == 0 {
            return Err(AppError::NoteNotFound(req.id));
        }

        self.events.emit(StoreEvent::NoteUpdated { id: req.id.clone() });
        self.get_note(&req.id).await
    }

    /// Set the pinned flag. Does not touch `updated_at`.
    pub async fn set_pinned(&self, id: &str, pinned: bool) -> Result<Note> {
        let rows = sqlx::query("UPDATE notes SET pinned = ? WHERE id = ?")
            .bind(pinned)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::NoteNotFound(id.to_string()));
        }

        self.events.emit(StoreEvent::NoteUpdated { id: id.to_string() });
        self.get_note(id).await
    }

    /// Reassign a note to a folder, or unfile it with `None`.
    ///
    /// No trash-state validation and no `updated_at` bump; the foreign
    /// key rejects ids of folders that do not exist.
    pub async fn set_folder(&self, id: &str, folder_id: Option<&str>) -> Result<Note> {
        let rows = sqlx::query("UPDATE notes SET folder_id = ? WHERE id = ?")
            .bind(folder_id)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::NoteNotFound(id.to_string()));
        }

        self.events.emit(StoreEvent::NoteUpdated { id: id.to_string() });
        self.get_note(id).await
    }

    /// Set or clear the assistant summary. Does not touch `updated_at`.
    pub async fn set_summary(&self, id: &str, summary: Option<&str>) -> Result<Note> {
        let rows = sqlx::query("UPDATE notes SET summary = ? WHERE id = ?")
            .bind(summary)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::NoteNotFound(id.to_string()));
        }

        self.events.emit(StoreEvent::NoteUpdated { id: id.to_string() });
        self.get_note(id).await
    }

    /// Move a note to the trash by stamping `deleted_at`.
    ///
    /// Idempotent: trashing an already-trashed note re-stamps the
    /// timestamp, which is acceptable.
    pub async fn trash_note(&self, id: &str) -> Result<Note> {
        let now = Utc::now();

        let rows = sqlx::query("UPDATE notes SET deleted_at = ? WHERE id = ?")
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::NoteNotFound(id.to_string()));
        }

        tracing::debug!("Trashed note: {}", id);
        self.events.emit(StoreEvent::NoteTrashed { id: id.to_string() });
        self.get_note(id).await
    }

    /// Clear `deleted_at`. Restoring an active note is a no-op in effect.
    pub async fn restore_note(&self, id: &str) -> Result<Note> {
        let rows = sqlx::query("UPDATE notes SET deleted_at = NULL WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::NoteNotFound(id.to_string()));
        }

        tracing::debug!("Restored note: {}", id);
        self.events.emit(StoreEvent::NoteRestored { id: id.to_string() });
        self.get_note(id).await
    }

    /// Permanently delete a note. Irreversible.
    ///
    /// The store does not require the note to be trashed first; the UI
    /// only reaches this from the trash view, but the operation itself
    /// is unconditional. Attachment rows cascade.
    pub async fn hard_delete_note(&self, id: &str) -> Result<()> {
        let rows = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::NoteNotFound(id.to_string()));
        }

        tracing::debug!("Hard deleted note: {}", id);
        self.events.emit(StoreEvent::NoteDeleted { id: id.to_string() });
        Ok(())
    }

    // ===== Attachments =====

    /// Create an attachment record. The bytes must already be in the
    /// blob store under `blob_hash`.
    pub async fn create_attachment(
        &self,
        note_id: &str,
        blob_hash: &str,
        filename: &str,
        mime_type: &str,
        size: i64,
    ) -> Result<Attachment> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let attachment = sqlx::query_as::<_, Attachment>(
            r#"
            INSERT INTO attachments (id, note_id, blob_hash, filename, mime_type, size, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(note_id)
        .bind(blob_hash)
        .bind(filename)
        .bind(mime_type)
        .bind(size)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created attachment: {} for note: {}", id, note_id);
        self.events.emit(StoreEvent::AttachmentCreated {
            id,
            note_id: note_id.to_string(),
        });
        Ok(attachment)
    }

    /// List attachments for a note, newest first
    pub async fn list_attachments(&self, note_id: &str) -> Result<Vec<Attachment>> {
        let attachments = sqlx::query_as::<_, Attachment>(
            "SELECT * FROM attachments WHERE note_id = ? ORDER BY created_at DESC, id ASC",
        )
        .bind(note_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(attachments)
    }

    /// Delete an attachment row, returning its blob hash so the caller
    /// can garbage-collect the blob if nothing else references it.
    pub async fn delete_attachment(&self, id: &str) -> Result<String> {
        let blob_hash: String =
            sqlx::query_scalar("SELECT blob_hash FROM attachments WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| AppError::AttachmentNotFound(id.to_string()))?;

        sqlx::query("DELETE FROM attachments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Deleted attachment: {}", id);
        self.events.emit(StoreEvent::AttachmentDeleted { id: id.to_string() });
        Ok(blob_hash)
    }

    /// Count blob references, for garbage-collection decisions
    pub async fn count_blob_references(&self, blob_hash: &str) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM attachments WHERE blob_hash = ?")
                .bind(blob_hash)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
