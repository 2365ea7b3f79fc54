//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use steward_core::{ConfigurationId, GuildId};

/// Steward - provision Discord servers from declarative configurations
#[derive(Parser, Debug)]
#[command(name = "steward")]
#[command(about = "Provision Discord servers from declarative configurations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file applied over the defaults
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API and, when a token is set, the Discord bot
    Serve,

    /// Apply a configuration to a server and wait for the result
    Provision(ProvisionArgs),

    /// Check a configuration file without applying it
    Validate {
        /// Path to the configuration JSON file
        file: PathBuf,
    },

    /// List stored configurations
    Configs,
}

/// Arguments of `steward provision`.
#[derive(Args, Debug)]
pub struct ProvisionArgs {
    /// Target server id
    #[arg(long)]
    pub guild: GuildId,

    /// Configuration source
    #[command(flatten)]
    pub source: ConfigSource,

    /// Plan against an empty in-memory server instead of Discord
    #[arg(long)]
    pub dry_run: bool,
}

/// Where `provision` reads its configuration from.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ConfigSource {
    /// Stored configuration id
    #[arg(long)]
    pub config_id: Option<String>,

    /// Stored configuration name
    #[arg(long)]
    pub config_name: Option<String>,

    /// Configuration JSON file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl ConfigSource {
    /// The stored id, if that is the chosen source.
    pub fn config_id(&self) -> Option<ConfigurationId> {
        self.config_id.as_deref().map(ConfigurationId::from)
    }
}
