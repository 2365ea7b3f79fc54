//! Core data types for Steward.
//!
//! This crate defines the declarative server configuration document, the
//! per-run setup status record and the small helpers shared by the
//! provisioning core and the platform integrations:
//!
//! - [`Configuration`] / [`ConfigurationDraft`] with [`RoleSpec`] and [`ChannelSpec`]
//! - [`SetupStatus`] and its [`SetupPhase`] transition table
//! - Opaque platform handles ([`RoleHandle`], [`CategoryHandle`], [`ChannelHandle`])
//! - Member greeting templates ([`render_template`], [`Greeting`])

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod color;
mod configuration;
mod greeting;
mod handle;
mod ids;
mod settings;
mod spec;
mod status;
mod template;

pub use color::Color;
pub use configuration::{Configuration, ConfigurationDraft};
pub use greeting::{EmbedSpec, Greeting, GreetingBody};
pub use handle::{CategoryHandle, ChannelHandle, RoleHandle};
pub use ids::{ConfigurationId, GuildId, StatusId};
pub use settings::{AutoRoleSettings, ModerationSettings, WelcomeSettings};
pub use spec::{ChannelKind, ChannelSpec, ChannelSpecBuilder, RoleSpec, RoleSpecBuilder};
pub use status::{SetupPhase, SetupStatus};
pub use template::{MemberContext, render_template};
