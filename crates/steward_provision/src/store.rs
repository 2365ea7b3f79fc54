//! Document store interfaces.

use async_trait::async_trait;
use steward_core::{Configuration, ConfigurationId, GuildId, SetupStatus, StatusId};
use steward_error::StorageResult;

/// Storage for configuration documents.
///
/// Names are unique across the store; inserting or renaming to a taken name
/// fails with [`StorageErrorKind::DuplicateName`](steward_error::StorageErrorKind::DuplicateName).
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// Store a new configuration.
    async fn insert(&self, config: Configuration) -> StorageResult<()>;

    /// Fetch a configuration by id.
    async fn get(&self, id: &ConfigurationId) -> StorageResult<Configuration>;

    /// Fetch a configuration by its unique name.
    async fn find_by_name(&self, name: &str) -> StorageResult<Option<Configuration>>;

    /// Fetch the configuration bound to a server.
    ///
    /// If several claim the server, the most recently modified one wins.
    async fn find_by_guild(&self, guild_id: GuildId) -> StorageResult<Option<Configuration>>;

    /// All configurations, oldest first.
    async fn list(&self) -> StorageResult<Vec<Configuration>>;

    /// Overwrite an existing configuration with the same id.
    async fn replace(&self, config: Configuration) -> StorageResult<()>;

    /// Remove a configuration.
    async fn delete(&self, id: &ConfigurationId) -> StorageResult<()>;
}

/// Storage for setup status records.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Store a new status record.
    async fn insert_status(&self, status: SetupStatus) -> StorageResult<()>;

    /// Overwrite an existing status record with the same id.
    async fn replace_status(&self, status: SetupStatus) -> StorageResult<()>;

    /// Fetch a status record.
    async fn get_status(&self, id: &StatusId) -> StorageResult<SetupStatus>;
}
