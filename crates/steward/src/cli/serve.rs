//! `steward serve` handler.

use crate::{App, Settings, discord_token};
use std::sync::Arc;
use steward_discord::BotConnection;
use steward_error::{ConfigError, StewardResult};
use steward_provision::{OfflineConnector, PlatformConnector};
use steward_server::ApiState;
use tracing::{error, info, warn};

/// Handle `steward serve`.
///
/// Starts the Discord bot when a token is configured, then serves the HTTP
/// API until Ctrl+C.
pub async fn handle_serve(settings: &Settings, app: &App) -> StewardResult<()> {
    let bot = match discord_token() {
        Some(token) => Some(Arc::new(BotConnection::new(
            token,
            Arc::clone(&app.configs),
            app.orchestrator.clone(),
            settings.platform.requests_per_second()?,
        ))),
        None => {
            warn!("No Discord bot token set; provisioning requests will be refused");
            None
        }
    };

    let platform: Arc<dyn PlatformConnector> = match &bot {
        Some(bot) => {
            if let Err(e) = bot.connect().await {
                error!(error = %e, "Failed to start Discord bot");
            }
            Arc::clone(bot) as Arc<dyn PlatformConnector>
        }
        None => Arc::new(OfflineConnector::new("Discord bot token not configured")),
    };

    let state = ApiState::new(Arc::clone(&app.configs), platform, app.orchestrator.clone());

    info!("Steward server starting. Press Ctrl+C to stop.");
    steward_server::serve(&settings.server.bind, state, shutdown_signal())
        .await
        .map_err(|e| {
            ConfigError::new(format!(
                "HTTP server on {} failed: {}",
                settings.server.bind, e
            ))
        })?;

    if let Some(bot) = bot {
        bot.disconnect().await;
    }
    info!("Steward server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
