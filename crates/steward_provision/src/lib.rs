//! Server provisioning for Steward.
//!
//! This crate turns a [`Configuration`](steward_core::Configuration) into a
//! sequence of create calls against a [`GuildCapability`], tracking progress
//! in a [`StatusStore`] as it goes.
//!
//! # Architecture
//!
//! - [`provision_roles`] and [`provision_channels`] process declarations in
//!   order, skipping individual failures and aborting on fatal ones
//! - [`Orchestrator`] sequences the phases and records the run's
//!   [`SetupStatus`](steward_core::SetupStatus) through a [`StatusTracker`]
//! - [`ConfigurationStore`] / [`StatusStore`] are implemented by
//!   [`InMemoryStore`] and [`JsonFileStore`]
//! - [`PlatformConnector`] resolves guild ids to capabilities
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use steward_core::{ChannelSpec, Configuration, ConfigurationDraft, GuildId, RoleSpec};
//! use steward_provision::{InMemoryGuild, InMemoryStore, Orchestrator};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Configuration::from_draft(ConfigurationDraft {
//!     name: "Starter".into(),
//!     roles: vec![RoleSpec::named("Admin")],
//!     channels: vec![
//!         ChannelSpec::category_named("Lobby", 0),
//!         ChannelSpec::text("general", Some("Lobby"), 1),
//!     ],
//!     ..Default::default()
//! })?;
//!
//! let guild = InMemoryGuild::new(GuildId(1));
//! let orchestrator = Orchestrator::new(Arc::new(InMemoryStore::new()));
//! let (_status_id, report) = orchestrator.provision(&guild, &config).await?;
//! assert_eq!(report.created(), 3);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod channels;
mod connector;
mod guild;
mod json_store;
mod memory_guild;
mod memory_store;
mod metrics;
mod orchestrator;
mod report;
mod roles;
mod store;
mod throttle;
mod tracker;

pub use channels::{ChannelProvisioning, DuplicateChannelPolicy, provision_channels};
pub use connector::{ConnectionSnapshot, InMemoryConnector, OfflineConnector, PlatformConnector};
pub use guild::{ExistingChannel, ExistingRole, GuildCapability};
pub use json_store::JsonFileStore;
pub use memory_guild::{GuildCall, InMemoryGuild};
pub use memory_store::InMemoryStore;
pub use metrics::{MetricsSnapshot, RunMetrics};
pub use orchestrator::Orchestrator;
pub use report::{RunReport, SpecOutcome, SpecReport};
pub use roles::{RoleProvisioning, provision_roles};
pub use store::{ConfigurationStore, StatusStore};
pub use throttle::{DirectRateLimiter, ThrottledGuild, creation_limiter};
pub use tracker::StatusTracker;
