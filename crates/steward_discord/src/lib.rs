//! Discord integration for Steward.
//!
//! - [`DiscordGuild`] implements the provisioning capability over serenity's HTTP client
//! - [`BotConnection`] owns the gateway connection and implements
//!   [`PlatformConnector`](steward_provision::PlatformConnector)
//! - The event handler greets members and assigns auto roles
//! - Slash commands: `setup_server`, `configure_welcome`, `configure_autorole`,
//!   `test_welcome` and `list_configs`
//!
//! # Example
//!
//! ```no_run
//! use std::num::NonZeroU32;
//! use std::sync::Arc;
//! use steward_discord::BotConnection;
//! use steward_provision::{InMemoryStore, Orchestrator, PlatformConnector};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(InMemoryStore::new());
//! let orchestrator = Orchestrator::new(store.clone());
//! let token = std::env::var("DISCORD_BOT_TOKEN")?;
//! let bot = BotConnection::new(token, store, orchestrator, NonZeroU32::new(5).unwrap());
//! bot.connect().await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod commands;
mod connection;
mod embeds;
mod error;
mod guild;
pub mod guild_settings;
mod handler;

pub use commands::command_definitions;
pub use connection::BotConnection;
pub use guild::DiscordGuild;
pub use handler::StewardHandler;
