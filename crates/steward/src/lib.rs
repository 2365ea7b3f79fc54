//! Steward - provision Discord servers from declarative configurations.
//!
//! The binary wires the workspace crates together:
//!
//! - [`steward_provision`] applies configurations and tracks progress
//! - [`steward_discord`] connects to Discord and handles slash commands
//! - [`steward_server`] exposes the HTTP API
//!
//! This library half holds the layered [`Settings`], tracing setup and the
//! command handlers so they can be tested.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
pub mod cli;
mod settings;
mod telemetry;

pub use app::App;
pub use settings::{
    LoggingSettings, PlatformSettings, ServerSettings, Settings, StorageBackend, StorageSettings,
    TOKEN_VARIABLES, discord_token,
};
pub use telemetry::{env_filter, init_tracing};
