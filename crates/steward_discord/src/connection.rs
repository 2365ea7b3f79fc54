//! Discord gateway connection management.

use crate::error::platform_error;
use crate::guild::DiscordGuild;
use crate::handler::StewardHandler;
use async_trait::async_trait;
use parking_lot::RwLock;
use serenity::Client;
use serenity::all::{Http, ShardManager};
use std::num::NonZeroU32;
use std::sync::Arc;
use steward_core::GuildId;
use steward_error::{PlatformError, PlatformErrorKind, PlatformResult};
use steward_provision::{
    ConfigurationStore, ConnectionSnapshot, DirectRateLimiter, GuildCapability, Orchestrator,
    PlatformConnector, ThrottledGuild, creation_limiter,
};
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

/// State shared between the connection manager and the event handler.
pub(crate) struct BotShared {
    pub(crate) configs: Arc<dyn ConfigurationStore>,
    pub(crate) orchestrator: Orchestrator,
    limiter: Arc<DirectRateLimiter>,
    state: RwLock<ConnectionSnapshot>,
}

impl BotShared {
    /// Capability for one server, paced by the bot-wide creation budget.
    pub(crate) fn capability(&self, http: Arc<Http>, guild_id: GuildId) -> Arc<dyn GuildCapability> {
        Arc::new(ThrottledGuild::with_limiter(
            DiscordGuild::new(http, guild_id),
            Arc::clone(&self.limiter),
        ))
    }

    pub(crate) fn mark_connected(&self) {
        let mut state = self.state.write();
        state.running = true;
        state.connected = true;
        state.last_error = None;
    }

    fn mark_stopped(&self, last_error: Option<String>) {
        let mut state = self.state.write();
        state.running = false;
        state.connected = false;
        if last_error.is_some() {
            state.last_error = last_error;
        }
    }

    fn snapshot(&self) -> ConnectionSnapshot {
        self.state.read().clone()
    }
}

/// Owns the Discord bot session.
///
/// The REST client is usable as soon as the connection is created; the
/// gateway session starts with [`connect`](PlatformConnector::connect) and
/// provisioning requests are refused until Discord reports it ready.
pub struct BotConnection {
    token: String,
    http: Arc<Http>,
    shared: Arc<BotShared>,
    shard_manager: Mutex<Option<Arc<ShardManager>>>,
}

impl BotConnection {
    /// Create a connection manager without connecting.
    ///
    /// # Arguments
    /// * `token` - Bot token from the Discord Developer Portal
    /// * `configs` - Store the slash commands read and update
    /// * `orchestrator` - Runs `setup_server` requests
    /// * `requests_per_second` - Client-side pacing of create calls, shared by all runs
    pub fn new(
        token: impl Into<String>,
        configs: Arc<dyn ConfigurationStore>,
        orchestrator: Orchestrator,
        requests_per_second: NonZeroU32,
    ) -> Self {
        let token = token.into();
        let http = Arc::new(Http::new(&token));
        Self {
            token,
            http,
            shared: Arc::new(BotShared {
                configs,
                orchestrator,
                limiter: creation_limiter(requests_per_second),
                state: RwLock::new(ConnectionSnapshot::default()),
            }),
            shard_manager: Mutex::new(None),
        }
    }

    /// Current connection health.
    pub fn health(&self) -> ConnectionSnapshot {
        self.shared.snapshot()
    }

    /// Shut down the gateway session if one is running.
    #[instrument(skip(self))]
    pub async fn disconnect(&self) {
        let manager = self.shard_manager.lock().await.take();
        match manager {
            Some(manager) => {
                info!("Shutting down Discord gateway");
                manager.shutdown_all().await;
                self.shared.mark_stopped(None);
            }
            None => warn!("Discord gateway is not running"),
        }
    }
}

#[async_trait]
impl PlatformConnector for BotConnection {
    #[instrument(skip(self), fields(guild_id = %guild_id))]
    async fn guild(&self, guild_id: GuildId) -> PlatformResult<Arc<dyn GuildCapability>> {
        if !self.shared.snapshot().connected {
            return Err(PlatformError::new(PlatformErrorKind::NotConnected(
                "Discord bot is not connected".to_string(),
            )));
        }

        self.http
            .get_guild(serenity::all::GuildId::new(guild_id.get()))
            .await
            .map_err(|e| platform_error(guild_id.get(), e))?;

        Ok(self.shared.capability(Arc::clone(&self.http), guild_id))
    }

    fn snapshot(&self) -> ConnectionSnapshot {
        self.health()
    }

    #[instrument(skip(self), fields(token_len = self.token.len()))]
    async fn connect(&self) -> PlatformResult<()> {
        {
            let mut state = self.shared.state.write();
            if state.running {
                return Err(PlatformError::new(PlatformErrorKind::AlreadyRunning));
            }
            state.running = true;
        }

        let intents = StewardHandler::intents();
        info!("Building Serenity client with intents: {:?}", intents);

        let client = Client::builder(&self.token, intents)
            .event_handler(StewardHandler::new(Arc::clone(&self.shared)))
            .await;
        let mut client = match client {
            Ok(client) => client,
            Err(e) => {
                let e = platform_error(0, e);
                self.shared.mark_stopped(Some(e.kind().to_string()));
                return Err(e);
            }
        };

        *self.shard_manager.lock().await = Some(Arc::clone(&client.shard_manager));

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            match client.start().await {
                Ok(()) => {
                    info!("Discord gateway stopped");
                    shared.mark_stopped(None);
                }
                Err(e) => {
                    error!(error = %e, "Discord gateway failed");
                    shared.mark_stopped(Some(e.to_string()));
                }
            }
        });

        info!("Discord gateway starting");
        Ok(())
    }
}
