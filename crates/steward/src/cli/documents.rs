//! Commands that read configuration documents.

use crate::App;
use std::path::Path;
use steward_core::{Configuration, ConfigurationDraft};
use steward_error::{ConfigError, StewardResult, ValidationError};
use tracing::{instrument, warn};

/// Read a configuration draft from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid document.
pub fn read_draft(path: &Path) -> StewardResult<ConfigurationDraft> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::new(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let draft = serde_json::from_str(&text).map_err(|e| {
        ValidationError::new(format!("Invalid configuration {}: {}", path.display(), e))
    })?;
    Ok(draft)
}

/// Read and validate a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation.
pub fn load_configuration(path: &Path) -> StewardResult<Configuration> {
    Ok(Configuration::from_draft(read_draft(path)?)?)
}

/// Handle `steward validate`.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn validate_file(path: &Path) -> StewardResult<()> {
    let config = load_configuration(path)?;
    let warnings = config.authoring_warnings();
    for warning in &warnings {
        warn!(%warning, "Configuration layout issue");
        println!("⚠ {}", warning);
    }
    println!(
        "✓ {}: {} roles, {} channels",
        config.name,
        config.roles.len(),
        config.channels.len()
    );
    Ok(())
}

/// Handle `steward configs`.
pub async fn list_configurations(app: &App) -> StewardResult<()> {
    let configs = app.configs.list().await?;
    if configs.is_empty() {
        println!("No saved configurations.");
        return Ok(());
    }
    for config in configs {
        let guild = config
            .guild_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{}  {:<24} guild {}  {}", config.id, config.name, guild, config.description);
    }
    Ok(())
}
