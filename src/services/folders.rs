//! Folders service
//!
//! Folder management for the sidebar: creation with defaults, rename,
//! and cascade deletion.

use crate::config;
use crate::database::{Folder, Repository};
use crate::error::Result;

/// Service for managing folders
#[derive(Clone)]
pub struct FoldersService {
    repo: Repository,
}

impl FoldersService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Create a folder. An empty name falls back to the default, the
    /// same way the sidebar's "new folder" action does.
    pub async fn create_folder(&self, name: &str, icon: Option<&str>) -> Result<Folder> {
        let name = name.trim();
        let name = if name.is_empty() {
            config::DEFAULT_FOLDER_NAME
        } else {
            name
        };

        tracing::info!("Creating folder: {}", name);
        self.repo.create_folder(name, icon).await
    }

    /// Get a folder by ID
    pub async fn get_folder(&self, id: &str) -> Result<Folder> {
        self.repo.get_folder(id).await
    }

    /// List folders in sidebar order (oldest first)
    pub async fn list_folders(&self) -> Result<Vec<Folder>> {
        self.repo.list_folders().await
    }

    /// Rename a folder
    pub async fn rename_folder(&self, id: &str, name: &str) -> Result<Folder> {
        self.repo.rename_folder(id, name).await
    }

    /// Delete a folder and every note filed under it, trashed or not.
    /// Returns how many notes the cascade removed.
    pub async fn delete_folder(&self, id: &str) -> Result<u64> {
        tracing::info!("Deleting folder: {}", id);
        self.repo.delete_folder(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::initialize_database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_service() -> FoldersService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        FoldersService::new(Repository::new(pool))
    }

    #[tokio::test]
    async fn test_create_folder_defaults() {
        let service = create_test_service().await;

        let folder = service.create_folder("  ", None).await.unwrap();
        assert_eq!(folder.name, "New Folder");
        assert_eq!(folder.icon, "folder");

        let named = service.create_folder("Work", Some("briefcase")).await.unwrap();
        assert_eq!(named.name, "Work");
        assert_eq!(named.icon, "briefcase");
    }

    #[tokio::test]
    async fn test_duplicate_names_allowed() {
        let service = create_test_service().await;

        service.create_folder("Ideas", None).await.unwrap();
        service.create_folder("Ideas", None).await.unwrap();

        let folders = service.list_folders().await.unwrap();
        assert_eq!(folders.len(), 2);
    }

    #[tokio::test]
    async fn test_rename_folder() {
        let service = create_test_service().await;

        let folder = service.create_folder("Old", None).await.unwrap();
        let renamed = service.rename_folder(&folder.id, "New").await.unwrap();

        assert_eq!(renamed.name, "New");
        assert_eq!(renamed.created_at, folder.created_at);
    }
}
