//! Configuration changes made from inside a server.
//!
//! These operations back the slash commands. They only touch the
//! configuration store, so they are platform independent.

use steward_core::{
    AutoRoleSettings, Configuration, ConfigurationDraft, GuildId, WelcomeSettings,
};
use steward_error::StewardResult;
use steward_provision::ConfigurationStore;
use tracing::{debug, info, instrument};

/// Maximum number of configurations listed by `list_configs`.
pub const LIST_LIMIT: usize = 10;

/// Bind the configuration called `name` to a server.
///
/// A server has at most one bound configuration; any other configuration
/// bound to `guild_id` is released first. Returns `None` if no configuration
/// has that name.
///
/// # Errors
///
/// Returns an error if the store fails.
#[instrument(skip(store))]
pub async fn bind_configuration(
    store: &dyn ConfigurationStore,
    name: &str,
    guild_id: GuildId,
) -> StewardResult<Option<Configuration>> {
    let Some(mut config) = store.find_by_name(name).await? else {
        return Ok(None);
    };

    for mut previous in store.list().await? {
        if previous.id == config.id || previous.guild_id != Some(guild_id) {
            continue;
        }
        previous.guild_id = None;
        store.replace(previous.clone()).await?;
        debug!(config_id = %previous.id, "Released previous server binding");
    }

    config.guild_id = Some(guild_id);
    config.touch();
    store.replace(config.clone()).await?;
    info!(config_id = %config.id, "Configuration bound to server");
    Ok(Some(config))
}

/// The configuration bound to a server, creating an empty one if none is.
async fn server_configuration(
    store: &dyn ConfigurationStore,
    guild_id: GuildId,
) -> StewardResult<Configuration> {
    if let Some(config) = store.find_by_guild(guild_id).await? {
        return Ok(config);
    }

    let mut config = Configuration::from_draft(ConfigurationDraft {
        name: format!("guild-{}", guild_id),
        description: "Settings configured from Discord".to_string(),
        ..Default::default()
    })?;
    config.guild_id = Some(guild_id);
    store.insert(config.clone()).await?;
    debug!(config_id = %config.id, "Created configuration for server");
    Ok(config)
}

/// Enable join greetings for a server.
///
/// Unset arguments fall back to the defaults. Leave-message settings already
/// stored for the server are kept.
///
/// # Errors
///
/// Returns an error if the store fails.
#[instrument(skip(store))]
pub async fn configure_welcome(
    store: &dyn ConfigurationStore,
    guild_id: GuildId,
    channel: Option<&str>,
    message: Option<&str>,
    server_name: &str,
) -> StewardResult<WelcomeSettings> {
    let mut config = server_configuration(store, guild_id).await?;
    let previous = config.welcome_settings.take().unwrap_or_default();
    let defaults = WelcomeSettings::default();

    let settings = WelcomeSettings {
        enabled: true,
        channel: channel.map(str::to_string).unwrap_or(defaults.channel.clone()),
        message: message.map(str::to_string).unwrap_or(defaults.message.clone()),
        thumbnail: true,
        footer: Some(format!("Welcome to {}", server_name)),
        goodbye_enabled: previous.goodbye_enabled,
        goodbye_channel: previous.goodbye_channel,
        goodbye_message: previous.goodbye_message,
        ..defaults
    };

    config.welcome_settings = Some(settings.clone());
    config.touch();
    store.replace(config).await?;
    info!(channel = %settings.channel, "Welcome messages configured");
    Ok(settings)
}

/// Enable automatic roles for a server.
///
/// `requested` is a comma separated list; only names present in `available`
/// are kept. Returns `None`, leaving the store untouched, when none are.
///
/// # Errors
///
/// Returns an error if the store fails.
#[instrument(skip(store, available))]
pub async fn configure_auto_roles(
    store: &dyn ConfigurationStore,
    guild_id: GuildId,
    requested: &str,
    available: &[String],
) -> StewardResult<Option<Vec<String>>> {
    let valid: Vec<String> = requested
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty() && available.iter().any(|a| a == name))
        .map(str::to_string)
        .collect();
    if valid.is_empty() {
        return Ok(None);
    }

    let mut config = server_configuration(store, guild_id).await?;
    config.auto_role_settings = Some(AutoRoleSettings::with_roles(valid.clone()));
    config.touch();
    store.replace(config).await?;
    info!(roles = ?valid, "Automatic roles configured");
    Ok(Some(valid))
}

/// Enabled join-greeting settings for a server, if any.
///
/// # Errors
///
/// Returns an error if the store fails.
pub async fn enabled_welcome(
    store: &dyn ConfigurationStore,
    guild_id: GuildId,
) -> StewardResult<Option<WelcomeSettings>> {
    Ok(store
        .find_by_guild(guild_id)
        .await?
        .and_then(|config| config.welcome_settings)
        .filter(|settings| settings.enabled))
}

/// One line per stored configuration, at most [`LIST_LIMIT`].
///
/// # Errors
///
/// Returns an error if the store fails.
pub async fn configuration_lines(store: &dyn ConfigurationStore) -> StewardResult<Vec<String>> {
    Ok(store
        .list()
        .await?
        .into_iter()
        .take(LIST_LIMIT)
        .map(|config| format!("• **{}**: {}", config.name, config.description))
        .collect())
}

/// Features a configuration switches on, for the setup summary.
pub fn enabled_features(config: &Configuration) -> Vec<&'static str> {
    let mut features = Vec::new();
    if config.welcome_settings.as_ref().is_some_and(|s| s.enabled) {
        features.push("🎉 Welcome messages enabled");
    }
    if config.auto_role_settings.as_ref().is_some_and(|s| s.enabled) {
        features.push("👤 Automatic role assignment enabled");
    }
    features
}
