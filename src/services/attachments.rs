//! Attachments service
//!
//! Image attachments for notes. Bytes go to the content-addressed blob
//! store, metadata rows to the repository; deleting the last reference
//! to a blob garbage-collects it.

use crate::database::{Attachment, Repository};
use crate::error::Result;
use crate::storage::BlobStore;

/// Service for managing attachments
#[derive(Clone)]
pub struct AttachmentsService {
    repo: Repository,
    blob_store: BlobStore,
}

impl AttachmentsService {
    pub fn new(repo: Repository, blob_store: BlobStore) -> Self {
        Self { repo, blob_store }
    }

    /// Attach binary data to a note
    pub async fn create_attachment(
        &self,
        note_id: &str,
        filename: &str,
        mime_type: &str,
        data: &[u8],
    ) -> Result<Attachment> {
        tracing::info!(
            "Creating attachment: {} for note: {} ({} bytes)",
            filename,
            note_id,
            data.len()
        );

        // Strip path separators before the name is ever used on disk
        let safe_filename = sanitize_filename(filename);

        let hash = self.blob_store.write(data).await?;

        let attachment = self
            .repo
            .create_attachment(note_id, &hash, &safe_filename, mime_type, data.len() as i64)
            .await?;

        tracing::info!("Attachment created: {}", attachment.id);

        Ok(attachment)
    }

    /// Read attachment bytes by blob hash
    pub async fn get_attachment_data(&self, blob_hash: &str) -> Result<Vec<u8>> {
        self.blob_store.read(blob_hash).await
    }

    /// List attachments for a note
    pub async fn list_attachments(&self, note_id: &str) -> Result<Vec<Attachment>> {
        self.repo.list_attachments(note_id).await
    }

    /// Delete an attachment row; the blob is removed once no other
    /// attachment references it.
    pub async fn delete_attachment(&self, attachment_id: &str) -> Result<()> {
        tracing::info!("Deleting attachment: {}", attachment_id);

        let blob_hash = self.repo.delete_attachment(attachment_id).await?;

        if self.repo.count_blob_references(&blob_hash).await? == 0 {
            self.blob_store.delete(&blob_hash).await?;
        }

        Ok(())
    }
}

/// Sanitize filename to prevent path traversal
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| *c != '/' && *c != '\\' && *c != '\0')
        .take(255)
        .collect()
}
