//! Application state and initialization
//!
//! Wires the pool, repository, blob store, and services together for
//! embedders. A presentation layer holds one `AppState` and drives
//! everything through it.

use crate::database::{create_pool, Repository, StoreEvent};
use crate::error::Result;
use crate::services::{AttachmentsService, FoldersService, MockResponder, NotesService};
use crate::storage::BlobStore;
use std::path::Path;
use tokio::sync::broadcast;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    repo: Repository,
    pub notes: NotesService,
    pub folders: FoldersService,
    pub attachments: AttachmentsService,
    pub responder: MockResponder,
}

impl AppState {
    /// Initialize the data core under the given data directory.
    ///
    /// Creates `memo.db` and the blob directory if missing, running
    /// migrations on first open.
    pub async fn init(data_dir: &Path) -> Result<Self> {
        tracing::info!("Initializing application state in {:?}", data_dir);

        std::fs::create_dir_all(data_dir)?;

        let pool = create_pool(&data_dir.join("memo.db")).await?;
        let repo = Repository::new(pool);

        let blob_store = BlobStore::new(data_dir.join("blobs"));
        blob_store.initialize().await?;

        let state = Self {
            notes: NotesService::new(repo.clone()),
            folders: FoldersService::new(repo.clone()),
            attachments: AttachmentsService::new(repo.clone(), blob_store),
            responder: MockResponder::new(),
            repo,
        };

        tracing::info!("Application state initialized");

        Ok(state)
    }

    /// Subscribe to store change events; the view layer re-renders on
    /// receipt.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.repo.subscribe()
    }
}
