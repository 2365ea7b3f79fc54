//! Status record bookkeeping for provisioning runs.

use crate::StatusStore;
use std::sync::Arc;
use steward_core::{ConfigurationId, GuildId, SetupPhase, SetupStatus, StatusId};
use steward_error::StewardResult;
use tracing::{debug, instrument};

/// Creates, updates and reads [`SetupStatus`] records.
///
/// Updates go through [`SetupStatus::apply`], so the phase transition table
/// is enforced no matter which store backs the tracker.
#[derive(Clone)]
pub struct StatusTracker {
    store: Arc<dyn StatusStore>,
}

impl StatusTracker {
    /// Track statuses in `store`.
    pub fn new(store: Arc<dyn StatusStore>) -> Self {
        Self { store }
    }

    /// Create a status record at 0% and return its id.
    ///
    /// # Errors
    ///
    /// Returns an error if `phase` is terminal or the store write fails.
    #[instrument(skip_all, fields(%guild_id, %config_id, %phase))]
    pub async fn create(
        &self,
        guild_id: GuildId,
        config_id: ConfigurationId,
        phase: SetupPhase,
        message: impl Into<String> + Send,
    ) -> StewardResult<StatusId> {
        let status = SetupStatus::new(guild_id, config_id, phase, message)?;
        let id = status.id().clone();
        self.store.insert_status(status).await?;
        debug!(status_id = %id, "Created setup status");
        Ok(id)
    }

    /// Move a run to a new phase, progress and message.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not exist, the transition is not
    /// allowed, or the store write fails. A rejected update leaves the stored
    /// record unchanged.
    #[instrument(skip_all, fields(%id, %phase, progress))]
    pub async fn update(
        &self,
        id: &StatusId,
        phase: SetupPhase,
        progress: u8,
        message: impl Into<String> + Send,
    ) -> StewardResult<SetupStatus> {
        let mut status = self.store.get_status(id).await?;
        status.apply(phase, progress, message)?;
        self.store.replace_status(status.clone()).await?;
        debug!(message = %status.message(), "Updated setup status");
        Ok(status)
    }

    /// Fetch a status record.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown id.
    pub async fn get(&self, id: &StatusId) -> StewardResult<SetupStatus> {
        Ok(self.store.get_status(id).await?)
    }
}
