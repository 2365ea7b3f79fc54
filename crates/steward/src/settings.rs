//! Layered application settings.
//!
//! Sources in order of precedence (later sources override earlier):
//! 1. Bundled defaults (`steward.toml` shipped with the binary)
//! 2. `~/.config/steward/steward.toml`
//! 3. `./steward.toml`
//! 4. A file passed with `--settings`
//! 5. `STEWARD_<SECTION>__<KEY>` environment variables

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use steward_error::{ConfigError, StewardResult};
use steward_provision::DuplicateChannelPolicy;
use tracing::{debug, instrument};

const DEFAULT_SETTINGS: &str = include_str!("../../../steward.toml");

/// Environment variables checked for the Discord bot token, in order.
pub const TOKEN_VARIABLES: [&str; 2] = ["DISCORD_BOT_TOKEN", "DISCORD_TOKEN"];

/// HTTP API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Address the API listens on.
    pub bind: String,
}

/// Where documents are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// In-process only; lost on exit.
    Memory,
    /// A single JSON file.
    Json,
}

/// Document storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Storage backend.
    pub backend: StorageBackend,
    /// JSON file path, used by the `json` backend.
    pub path: PathBuf,
}

/// Chat platform settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSettings {
    /// Create calls allowed per second.
    pub requests_per_second: u32,
    /// Handling of channels that already exist.
    pub channel_policy: DuplicateChannelPolicy,
}

impl PlatformSettings {
    /// The request rate as a quota value.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate is zero.
    pub fn requests_per_second(&self) -> Result<NonZeroU32, ConfigError> {
        NonZeroU32::new(self.requests_per_second)
            .ok_or_else(|| ConfigError::new("platform.requests_per_second must be at least 1"))
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

/// All Steward settings.
///
/// # Example
///
/// ```no_run
/// use steward::Settings;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = Settings::load(None)?;
/// println!("API listens on {}", settings.server.bind);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// HTTP API.
    pub server: ServerSettings,
    /// Document storage.
    pub storage: StorageSettings,
    /// Chat platform.
    pub platform: PlatformSettings,
    /// Logging.
    pub logging: LoggingSettings,
}

impl Settings {
    /// The bundled defaults alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file is malformed.
    pub fn bundled() -> StewardResult<Self> {
        Self::build(bundled_builder())
    }

    /// Bundled defaults overridden by one file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> StewardResult<Self> {
        debug!("Loading settings from file");
        Self::build(bundled_builder().add_source(File::from(path.as_ref())))
    }

    /// Load settings from every source.
    ///
    /// User files are optional; `explicit`, when given, must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or the result is invalid.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> StewardResult<Self> {
        debug!("Loading settings with precedence: env > explicit > current dir > home dir > bundled");
        let mut builder = bundled_builder();

        if let Some(home) = dirs::home_dir() {
            let home_settings = home.join(".config/steward/steward.toml");
            builder = builder.add_source(File::from(home_settings).required(false));
        }
        builder = builder.add_source(File::with_name("steward").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("STEWARD")
                .prefix_separator("_")
                .separator("__"),
        );

        Self::build(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> StewardResult<Self> {
        let settings: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build settings: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))?;
        settings.platform.requests_per_second()?;
        Ok(settings)
    }
}

fn bundled_builder() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml))
}

/// The Discord bot token from the environment, if set and not blank.
pub fn discord_token() -> Option<String> {
    TOKEN_VARIABLES
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|token| !token.trim().is_empty())
}
