//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the steward binary.

mod commands;
mod documents;
mod provision;
mod serve;

pub use commands::{Cli, Commands, ConfigSource, ProvisionArgs};
pub use documents::{list_configurations, load_configuration, read_draft, validate_file};
pub use provision::handle_provision;
pub use serve::handle_serve;
