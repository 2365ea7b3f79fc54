//! `steward provision` handler.

use crate::cli::commands::ProvisionArgs;
use crate::cli::documents::load_configuration;
use crate::{App, Settings, discord_token};
use std::sync::Arc;
use steward_core::Configuration;
use steward_discord::DiscordGuild;
use steward_error::{ConfigError, StewardResult, StorageError};
use steward_provision::{GuildCapability, InMemoryGuild, RunReport, SpecOutcome, ThrottledGuild};
use tracing::{info, instrument};

async fn resolve_configuration(app: &App, args: &ProvisionArgs) -> StewardResult<Configuration> {
    if let Some(id) = args.source.config_id() {
        return Ok(app.configs.get(&id).await?);
    }
    if let Some(name) = &args.source.config_name {
        return app
            .configs
            .find_by_name(name)
            .await?
            .ok_or_else(|| StorageError::not_found("Configuration", name.clone()).into());
    }
    match &args.source.file {
        Some(path) => load_configuration(path),
        None => Err(ConfigError::new("No configuration source given").into()),
    }
}

/// Handle `steward provision`.
#[instrument(skip_all, fields(guild_id = %args.guild, dry_run = args.dry_run))]
pub async fn handle_provision(
    settings: &Settings,
    app: &App,
    args: &ProvisionArgs,
) -> StewardResult<()> {
    let config = resolve_configuration(app, args).await?;

    let guild: Arc<dyn GuildCapability> = if args.dry_run {
        info!("Dry run against an empty in-memory server");
        Arc::new(InMemoryGuild::new(args.guild))
    } else {
        let token = discord_token().ok_or_else(|| {
            ConfigError::new("Set DISCORD_BOT_TOKEN to provision a Discord server")
        })?;
        Arc::new(ThrottledGuild::new(
            DiscordGuild::with_token(&token, args.guild),
            settings.platform.requests_per_second()?,
        ))
    };

    let (status_id, report) = app.orchestrator.provision(guild.as_ref(), &config).await?;
    print_report(&config, &report);
    println!("Status: {}", status_id);
    Ok(())
}

fn print_report(config: &Configuration, report: &RunReport) {
    println!("✅ Applied '{}': {}", config.name, report.summary());
    for spec in report.roles.iter().chain(report.channels.iter()) {
        let outcome = match &spec.outcome {
            SpecOutcome::Created => "created".to_string(),
            SpecOutcome::Reused => "reused".to_string(),
            SpecOutcome::Skipped { reason } => format!("skipped: {}", reason),
        };
        println!("  {:<8} {:<24} {}", spec.kind, spec.name, outcome);
    }
}
