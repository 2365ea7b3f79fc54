//! In-memory document store.

use crate::{ConfigurationStore, StatusStore};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use steward_core::{Configuration, ConfigurationId, GuildId, SetupStatus, StatusId};
use steward_error::{StorageError, StorageErrorKind, StorageResult};
use tokio::sync::RwLock;

/// The full contents of a store, shared by the in-memory and file backends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Documents {
    #[serde(default)]
    configurations: BTreeMap<ConfigurationId, Configuration>,
    #[serde(default)]
    statuses: BTreeMap<StatusId, SetupStatus>,
}

impl Documents {
    fn name_taken(&self, name: &str, except: Option<&ConfigurationId>) -> bool {
        self.configurations
            .values()
            .any(|c| c.name == name && Some(&c.id) != except)
    }

    pub(crate) fn insert(&mut self, config: Configuration) -> StorageResult<()> {
        if self.name_taken(&config.name, None) {
            return Err(StorageError::new(StorageErrorKind::DuplicateName(
                config.name,
            )));
        }
        self.configurations.insert(config.id.clone(), config);
        Ok(())
    }

    pub(crate) fn get(&self, id: &ConfigurationId) -> StorageResult<Configuration> {
        self.configurations
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::not_found("Configuration", id.as_str()))
    }

    pub(crate) fn find_by_name(&self, name: &str) -> Option<Configuration> {
        self.configurations.values().find(|c| c.name == name).cloned()
    }

    pub(crate) fn find_by_guild(&self, guild_id: GuildId) -> Option<Configuration> {
        self.configurations
            .values()
            .filter(|c| c.guild_id == Some(guild_id))
            .max_by_key(|c| c.updated_at)
            .cloned()
    }

    pub(crate) fn list(&self) -> Vec<Configuration> {
        let mut all: Vec<Configuration> = self.configurations.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)));
        all
    }

    pub(crate) fn replace(&mut self, config: Configuration) -> StorageResult<()> {
        if !self.configurations.contains_key(&config.id) {
            return Err(StorageError::not_found("Configuration", config.id.as_str()));
        }
        if self.name_taken(&config.name, Some(&config.id)) {
            return Err(StorageError::new(StorageErrorKind::DuplicateName(
                config.name,
            )));
        }
        self.configurations.insert(config.id.clone(), config);
        Ok(())
    }

    pub(crate) fn delete(&mut self, id: &ConfigurationId) -> StorageResult<()> {
        self.configurations
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found("Configuration", id.as_str()))
    }

    pub(crate) fn insert_status(&mut self, status: SetupStatus) {
        self.statuses.insert(status.id().clone(), status);
    }

    pub(crate) fn replace_status(&mut self, status: SetupStatus) -> StorageResult<()> {
        if !self.statuses.contains_key(status.id()) {
            return Err(StorageError::not_found("SetupStatus", status.id().as_str()));
        }
        self.statuses.insert(status.id().clone(), status);
        Ok(())
    }

    pub(crate) fn get_status(&self, id: &StatusId) -> StorageResult<SetupStatus> {
        self.statuses
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::not_found("SetupStatus", id.as_str()))
    }
}

/// Store holding configurations and status records in memory.
///
/// Clones share the same contents. All data is lost when the last clone is
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    documents: Arc<RwLock<Documents>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored configurations.
    pub async fn configuration_count(&self) -> usize {
        self.documents.read().await.configurations.len()
    }

    /// Number of stored status records.
    pub async fn status_count(&self) -> usize {
        self.documents.read().await.statuses.len()
    }
}

#[async_trait]
impl ConfigurationStore for InMemoryStore {
    async fn insert(&self, config: Configuration) -> StorageResult<()> {
        self.documents.write().await.insert(config)
    }

    async fn get(&self, id: &ConfigurationId) -> StorageResult<Configuration> {
        self.documents.read().await.get(id)
    }

    async fn find_by_name(&self, name: &str) -> StorageResult<Option<Configuration>> {
        Ok(self.documents.read().await.find_by_name(name))
    }

    async fn find_by_guild(&self, guild_id: GuildId) -> StorageResult<Option<Configuration>> {
        Ok(self.documents.read().await.find_by_guild(guild_id))
    }

    async fn list(&self) -> StorageResult<Vec<Configuration>> {
        Ok(self.documents.read().await.list())
    }

    async fn replace(&self, config: Configuration) -> StorageResult<()> {
        self.documents.write().await.replace(config)
    }

    async fn delete(&self, id: &ConfigurationId) -> StorageResult<()> {
        self.documents.write().await.delete(id)
    }
}

#[async_trait]
impl StatusStore for InMemoryStore {
    async fn insert_status(&self, status: SetupStatus) -> StorageResult<()> {
        self.documents.write().await.insert_status(status);
        Ok(())
    }

    async fn replace_status(&self, status: SetupStatus) -> StorageResult<()> {
        self.documents.write().await.replace_status(status)
    }

    async fn get_status(&self, id: &StatusId) -> StorageResult<SetupStatus> {
        self.documents.read().await.get_status(id)
    }
}
