//! Wiring of stores and the orchestrator from settings.

use crate::{Settings, StorageBackend};
use std::sync::Arc;
use steward_error::StewardResult;
use steward_provision::{ConfigurationStore, InMemoryStore, JsonFileStore, Orchestrator, StatusStore};
use tracing::info;

/// Long-lived services shared by every command.
#[derive(Clone)]
pub struct App {
    /// Configuration documents.
    pub configs: Arc<dyn ConfigurationStore>,
    /// Runs provisioning and records status.
    pub orchestrator: Orchestrator,
}

impl App {
    /// Open the configured store and build the orchestrator.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON store cannot be opened.
    pub async fn open(settings: &Settings) -> StewardResult<Self> {
        let (configs, statuses): (Arc<dyn ConfigurationStore>, Arc<dyn StatusStore>) =
            match settings.storage.backend {
                StorageBackend::Memory => {
                    info!("Using in-memory storage");
                    let store = Arc::new(InMemoryStore::new());
                    let configs: Arc<dyn ConfigurationStore> = store.clone();
                    (configs, store as Arc<dyn StatusStore>)
                }
                StorageBackend::Json => {
                    info!(path = %settings.storage.path.display(), "Using JSON file storage");
                    let store = Arc::new(JsonFileStore::open(&settings.storage.path).await?);
                    let configs: Arc<dyn ConfigurationStore> = store.clone();
                    (configs, store as Arc<dyn StatusStore>)
                }
            };

        let orchestrator =
            Orchestrator::new(statuses).with_policy(settings.platform.channel_policy);
        Ok(Self {
            configs,
            orchestrator,
        })
    }
}
