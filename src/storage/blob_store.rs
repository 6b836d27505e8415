//! Content-addressed blob storage for image attachments
//!
//! Attachment bytes are stored under their SHA-256 hash, fanned out in
//! a two-level directory structure: hash "abcd1234..." lands at
//! "blobs/ab/cd/abcd1234...". Writing the same content twice is a
//! no-op, so attachment rows can share blobs.

use crate::error::{AppError, Result};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Content-addressed blob store
#[derive(Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Create a new blob store at the given root directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Initialize the blob store (create directory if needed)
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        tracing::info!("Blob store initialized at: {:?}", self.root);
        Ok(())
    }

    /// Write data to the store, returning its SHA-256 hash.
    ///
    /// Idempotent per content: an existing blob is left in place.
    pub async fn write(&self, data: &[u8]) -> Result<String> {
        let hash = calculate_hash(data);

        if self.exists(&hash).await? {
            tracing::debug!("Blob already exists: {}", hash);
            return Ok(hash);
        }

        let path = self.blob_path(&hash);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write to a temp file and rename so readers never see a
        // half-written blob
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;

        fs::rename(temp_path, &path).await?;

        tracing::debug!("Wrote blob: {} ({} bytes)", hash, data.len());

        Ok(hash)
    }

    /// Read a blob's bytes by hash
    pub async fn read(&self, hash: &str) -> Result<Vec<u8>> {
        let path = self.blob_path(hash);

        if !path.exists() {
            return Err(AppError::BlobStore(format!("Blob not found: {}", hash)));
        }

        let mut file = fs::File::open(&path).await?;
        let mut data = Vec::new();
        file.read_to_end(&mut data).await?;

        Ok(data)
    }

    /// Check whether a blob exists
    pub async fn exists(&self, hash: &str) -> Result<bool> {
        Ok(self.blob_path(hash).exists())
    }

    /// Delete a blob. Deleting a missing blob is a no-op.
    pub async fn delete(&self, hash: &str) -> Result<()> {
        let path = self.blob_path(hash);

        if !path.exists() {
            return Ok(());
        }

        fs::remove_file(&path).await?;

        tracing::debug!("Deleted blob: {}", hash);

        Ok(())
    }

    fn blob_path(&self, hash: &str) -> PathBuf {
        // Two-level fan-out: blobs/ab/cd/abcd1234...
        let prefix1 = &hash[0..2];
        let prefix2 = &hash[2..4];
        self.root.join(prefix1).join(prefix2).join(hash)
    }
}

/// SHA-256 hash of data as lowercase hex
pub fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
