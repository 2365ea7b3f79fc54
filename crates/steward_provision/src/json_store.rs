//! Document store persisted to a single JSON file.

use crate::memory_store::Documents;
use crate::{ConfigurationStore, StatusStore};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use steward_core::{Configuration, ConfigurationId, GuildId, SetupStatus, StatusId};
use steward_error::{StorageError, StorageErrorKind, StorageResult};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Store that keeps its documents in memory and rewrites one JSON file
/// after every mutation.
///
/// A mutation only becomes visible once the file write succeeded.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    documents: Mutex<Documents>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading existing contents if the file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        let documents = if tokio::fs::try_exists(&path).await.map_err(io_error)? {
            let json = tokio::fs::read_to_string(&path).await.map_err(io_error)?;
            let documents: Documents = serde_json::from_str(&json).map_err(|e| {
                StorageError::new(StorageErrorKind::Serialization(e.to_string()))
            })?;
            info!("Loaded document store");
            documents
        } else {
            debug!("No existing document store, starting empty");
            Documents::default()
        };

        Ok(Self {
            path,
            documents: Mutex::new(documents),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut Documents) -> StorageResult<T>,
    ) -> StorageResult<T> {
        let mut documents = self.documents.lock().await;
        let mut next = documents.clone();
        let value = change(&mut next)?;
        self.write(&next).await?;
        *documents = next;
        Ok(value)
    }

    async fn write(&self, documents: &Documents) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(documents)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        tokio::fs::write(&self.path, json).await.map_err(io_error)?;
        debug!(path = %self.path.display(), "Document store saved");
        Ok(())
    }
}

#[track_caller]
fn io_error(e: std::io::Error) -> StorageError {
    StorageError::new(StorageErrorKind::Io(e.to_string()))
}

#[async_trait]
impl ConfigurationStore for JsonFileStore {
    async fn insert(&self, config: Configuration) -> StorageResult<()> {
        self.mutate(|docs| docs.insert(config)).await
    }

    async fn get(&self, id: &ConfigurationId) -> StorageResult<Configuration> {
        self.documents.lock().await.get(id)
    }

    async fn find_by_name(&self, name: &str) -> StorageResult<Option<Configuration>> {
        Ok(self.documents.lock().await.find_by_name(name))
    }

    async fn find_by_guild(&self, guild_id: GuildId) -> StorageResult<Option<Configuration>> {
        Ok(self.documents.lock().await.find_by_guild(guild_id))
    }

    async fn list(&self) -> StorageResult<Vec<Configuration>> {
        Ok(self.documents.lock().await.list())
    }

    async fn replace(&self, config: Configuration) -> StorageResult<()> {
        self.mutate(|docs| docs.replace(config)).await
    }

    async fn delete(&self, id: &ConfigurationId) -> StorageResult<()> {
        self.mutate(|docs| docs.delete(id)).await
    }
}

#[async_trait]
impl StatusStore for JsonFileStore {
    async fn insert_status(&self, status: SetupStatus) -> StorageResult<()> {
        self.mutate(|docs| {
            docs.insert_status(status);
            Ok(())
        })
        .await
    }

    async fn replace_status(&self, status: SetupStatus) -> StorageResult<()> {
        self.mutate(|docs| docs.replace_status(status)).await
    }

    async fn get_status(&self, id: &StatusId) -> StorageResult<SetupStatus> {
        self.documents.lock().await.get_status(id)
    }
}
