//! Error types for the glassmemo data core
//!
//! All errors use thiserror for structured error handling.
//! These errors can be serialized to the frontend.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Attachment not found: {0}")]
    AttachmentNotFound(String),

    #[error("Blob store error: {0}")]
    BlobStore(String),

    #[error("Assistant error: {0}")]
    Assistant(String),

    #[error("{0}")]
    Generic(String),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_serialize_as_display_strings() {
        let err = AppError::NoteNotFound("abc".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Note not found: abc\"");

        let err = AppError::Generic("boom".to_string());
        assert_eq!(serde_json::to_string(&err).unwrap(), "\"boom\"");
    }
}
