//! Access to target servers through a platform connection.

use crate::{GuildCapability, InMemoryGuild};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use steward_core::GuildId;
use steward_error::{PlatformError, PlatformErrorKind, PlatformResult};

/// Health of a platform connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSnapshot {
    /// The connection task has been started.
    pub running: bool,
    /// The platform reported the session as ready.
    pub connected: bool,
    /// Last connection error, if any.
    pub last_error: Option<String>,
}

/// Resolves server ids to capabilities and manages the underlying connection.
#[async_trait]
pub trait PlatformConnector: Send + Sync {
    /// Capability for one target server.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformErrorKind::NotConnected`] when no connection is
    /// available, or [`PlatformErrorKind::GuildNotFound`] for an unknown server.
    async fn guild(&self, guild_id: GuildId) -> PlatformResult<Arc<dyn GuildCapability>>;

    /// Current connection health.
    fn snapshot(&self) -> ConnectionSnapshot;

    /// Start the connection.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformErrorKind::AlreadyRunning`] if it is already started.
    async fn connect(&self) -> PlatformResult<()>;
}

/// Connector serving [`InMemoryGuild`]s registered up front.
#[derive(Debug, Default)]
pub struct InMemoryConnector {
    guilds: RwLock<HashMap<GuildId, Arc<InMemoryGuild>>>,
    state: RwLock<ConnectionSnapshot>,
}

impl InMemoryConnector {
    /// A connector that is not yet started.
    pub fn new() -> Self {
        Self::default()
    }

    /// A connector that is already started and ready.
    pub fn connected() -> Self {
        let connector = Self::new();
        {
            let mut state = connector.state.write();
            state.running = true;
            state.connected = true;
        }
        connector
    }

    /// Register a server and return a handle for inspecting it.
    pub fn add_guild(&self, guild: InMemoryGuild) -> Arc<InMemoryGuild> {
        let guild = Arc::new(guild);
        self.guilds
            .write()
            .insert(guild.guild_id(), Arc::clone(&guild));
        guild
    }
}

#[async_trait]
impl PlatformConnector for InMemoryConnector {
    async fn guild(&self, guild_id: GuildId) -> PlatformResult<Arc<dyn GuildCapability>> {
        if !self.state.read().connected {
            return Err(PlatformError::new(PlatformErrorKind::NotConnected(
                "Connector not started".to_string(),
            )));
        }
        match self.guilds.read().get(&guild_id) {
            Some(guild) => Ok(Arc::clone(guild) as Arc<dyn GuildCapability>),
            None => Err(PlatformError::new(PlatformErrorKind::GuildNotFound(
                guild_id.get(),
            ))),
        }
    }

    fn snapshot(&self) -> ConnectionSnapshot {
        self.state.read().clone()
    }

    async fn connect(&self) -> PlatformResult<()> {
        let mut state = self.state.write();
        if state.running {
            return Err(PlatformError::new(PlatformErrorKind::AlreadyRunning));
        }
        state.running = true;
        state.connected = true;
        state.last_error = None;
        Ok(())
    }
}

/// Connector used when no platform credentials are configured.
#[derive(Debug, Clone)]
pub struct OfflineConnector {
    reason: String,
}

impl OfflineConnector {
    /// A connector whose every request fails with `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl PlatformConnector for OfflineConnector {
    async fn guild(&self, _guild_id: GuildId) -> PlatformResult<Arc<dyn GuildCapability>> {
        Err(PlatformError::new(PlatformErrorKind::NotConnected(
            self.reason.clone(),
        )))
    }

    fn snapshot(&self) -> ConnectionSnapshot {
        ConnectionSnapshot {
            running: false,
            connected: false,
            last_error: Some(self.reason.clone()),
        }
    }

    async fn connect(&self) -> PlatformResult<()> {
        Err(PlatformError::new(PlatformErrorKind::NotConnected(
            self.reason.clone(),
        )))
    }
}
