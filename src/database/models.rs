//! Database models
//!
//! Rust structs representing database entities.
//! All models use serde for serialization to frontend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A folder grouping notes. Deleting a folder cascades to its notes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    pub id: String,
    pub name: String,
    /// Icon identifier shown in the sidebar
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

/// A note. `deleted_at` doubles as the trash flag: null means active,
/// non-null records the instant the note was moved to trash.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pinned: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    /// Owning folder; null means unfiled
    pub folder_id: Option<String>,
    /// Assistant-generated summary, if one has been requested
    pub summary: Option<String>,
}

impl Note {
    /// True when the note is in the trash
    pub fn is_trashed(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Create note request
#[derive(Debug, Default, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    pub folder_id: Option<String>,
}

/// Update note request
#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub id: String,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Image attachment linked to a note. The bytes live in the blob store;
/// this row carries only metadata.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attachment {
    pub id: String,
    pub note_id: String,
    /// SHA-256 hash of the file content
    pub blob_hash: String,
    pub filename: String,
    pub mime_type: String,
    pub size: i64,
    pub created_at: DateTime<Utc>,
}
