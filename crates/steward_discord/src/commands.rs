//! Slash command definitions and handlers.

use crate::connection::BotShared;
use crate::embeds::create_embed;
use crate::error::platform_error;
use crate::guild_settings;
use crate::handler::{member_context, server_name};
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, GuildId, Mentionable, Permissions,
};
use steward_core::{Color, MemberContext};
use steward_error::StewardResult;
use tracing::{error, info, instrument, warn};

/// Slash commands registered when the bot becomes ready.
pub fn command_definitions() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("setup_server")
            .description("Set up this server from a saved configuration")
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "config_name",
                    "Name of the configuration to apply",
                )
                .required(true),
            ),
        CreateCommand::new("configure_welcome")
            .description("Configure welcome messages for this server")
            .default_member_permissions(Permissions::MANAGE_GUILD)
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "channel_name",
                "Channel that receives welcome messages",
            ))
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "message",
                "Message template; {user}, {username} and {server} are replaced",
            )),
        CreateCommand::new("configure_autorole")
            .description("Configure roles given to new members")
            .default_member_permissions(Permissions::MANAGE_ROLES)
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "roles",
                    "Comma separated role names",
                )
                .required(true),
            ),
        CreateCommand::new("test_welcome").description("Preview the welcome message"),
        CreateCommand::new("list_configs").description("List saved configurations"),
    ]
}

/// What a command sends back.
enum Reply {
    Text(String),
    Embed(CreateEmbed),
}

impl Reply {
    fn failure(message: impl std::fmt::Display) -> Self {
        Reply::Text(format!("❌ {}", message))
    }

    fn success(title: &str, description: impl Into<String>) -> Self {
        Reply::Embed(
            CreateEmbed::new()
                .title(title)
                .description(description)
                .colour(Color::GREEN.value()),
        )
    }

    fn message(self) -> CreateInteractionResponseMessage {
        match self {
            Reply::Text(text) => CreateInteractionResponseMessage::new().content(text),
            Reply::Embed(embed) => CreateInteractionResponseMessage::new().embed(embed),
        }
    }

    fn followup(self) -> CreateInteractionResponseFollowup {
        match self {
            Reply::Text(text) => CreateInteractionResponseFollowup::new().content(text),
            Reply::Embed(embed) => CreateInteractionResponseFollowup::new().embed(embed),
        }
    }
}

fn option_str<'a>(command: &'a CommandInteraction, name: &str) -> Option<&'a str> {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_str())
}

/// Run a slash command and answer the interaction.
#[instrument(skip_all, fields(command = %command.data.name, guild_id = ?command.guild_id))]
pub(crate) async fn handle_command(ctx: &Context, command: &CommandInteraction, shared: &BotShared) {
    let Some(guild_id) = command.guild_id else {
        respond(ctx, command, Reply::failure("This command can only be used in a server.")).await;
        return;
    };

    if command.data.name == "setup_server" {
        setup_server(ctx, command, shared, guild_id).await;
        return;
    }

    let result = match command.data.name.as_str() {
        "configure_welcome" => configure_welcome(ctx, command, shared, guild_id).await,
        "configure_autorole" => configure_autorole(ctx, command, shared, guild_id).await,
        "test_welcome" => test_welcome(ctx, command, shared, guild_id).await,
        "list_configs" => list_configs(shared).await,
        other => {
            warn!(command = %other, "Unknown command");
            Ok(Reply::failure(format!("Unknown command: {}", other)))
        }
    };

    let reply = result.unwrap_or_else(|e| {
        error!(error = %e, "Command failed");
        Reply::failure(format!("Error: {}", e.reason()))
    });
    respond(ctx, command, reply).await;
}

async fn respond(ctx: &Context, command: &CommandInteraction, reply: Reply) {
    let response = CreateInteractionResponse::Message(reply.message());
    if let Err(e) = command.create_response(&ctx.http, response).await {
        error!(error = %e, "Failed to respond to command");
    }
}

async fn follow_up(ctx: &Context, command: &CommandInteraction, reply: Reply) {
    if let Err(e) = command.create_followup(&ctx.http, reply.followup()).await {
        error!(error = %e, "Failed to send follow-up");
    }
}

/// Bind a configuration to the invoking server and apply it.
///
/// Provisioning can outlast the interaction's response window, so the
/// response is deferred and results arrive as follow-ups.
async fn setup_server(
    ctx: &Context,
    command: &CommandInteraction,
    shared: &BotShared,
    guild_id: GuildId,
) {
    if let Err(e) = command.defer(&ctx.http).await {
        error!(error = %e, "Failed to defer setup command");
        return;
    }

    let Some(name) = option_str(command, "config_name") else {
        follow_up(ctx, command, Reply::failure("Missing configuration name.")).await;
        return;
    };

    let target = steward_core::GuildId(guild_id.get());
    let config = match guild_settings::bind_configuration(shared.configs.as_ref(), name, target).await
    {
        Ok(Some(config)) => config,
        Ok(None) => {
            let reply = Reply::failure(format!("No configuration named: {}", name));
            follow_up(ctx, command, reply).await;
            return;
        }
        Err(e) => {
            follow_up(ctx, command, Reply::failure(format!("Error: {}", e.reason()))).await;
            return;
        }
    };

    let reply = Reply::Text(format!("🚀 Starting server setup with: {}", name));
    follow_up(ctx, command, reply).await;

    let guild = shared.capability(ctx.http.clone(), target);
    match shared.orchestrator.provision(guild.as_ref(), &config).await {
        Ok((status_id, report)) => {
            info!(%status_id, summary = %report.summary(), "Setup command finished");
            let mut embed = CreateEmbed::new()
                .title("✅ Server setup complete!")
                .description(format!(
                    "Applied configuration **{}**\n{}",
                    name,
                    report.summary()
                ))
                .colour(Color::GREEN.value());
            let features = guild_settings::enabled_features(&config);
            if !features.is_empty() {
                embed = embed.field("Enabled features", features.join("\n"), false);
            }
            follow_up(ctx, command, Reply::Embed(embed)).await;
        }
        Err(e) => {
            let reply = Reply::failure(format!("Server setup failed: {}", e.reason()));
            follow_up(ctx, command, reply).await;
        }
    }
}

async fn configure_welcome(
    ctx: &Context,
    command: &CommandInteraction,
    shared: &BotShared,
    guild_id: GuildId,
) -> StewardResult<Reply> {
    let server = server_name(&ctx.http, guild_id).await?;
    let settings = guild_settings::configure_welcome(
        shared.configs.as_ref(),
        steward_core::GuildId(guild_id.get()),
        option_str(command, "channel_name"),
        option_str(command, "message"),
        &server,
    )
    .await?;

    Ok(Reply::success(
        "✅ Welcome messages configured!",
        format!("Channel: #{}\nMessage: {}", settings.channel, settings.message),
    ))
}

async fn configure_autorole(
    ctx: &Context,
    command: &CommandInteraction,
    shared: &BotShared,
    guild_id: GuildId,
) -> StewardResult<Reply> {
    let requested = option_str(command, "roles").unwrap_or_default();
    let available: Vec<String> = ctx
        .http
        .get_guild_roles(guild_id)
        .await
        .map_err(|e| platform_error(guild_id.get(), e))?
        .into_iter()
        .map(|role| role.name)
        .collect();

    let roles = guild_settings::configure_auto_roles(
        shared.configs.as_ref(),
        steward_core::GuildId(guild_id.get()),
        requested,
        &available,
    )
    .await?;

    Ok(match roles {
        Some(roles) => Reply::success(
            "✅ Automatic roles configured!",
            format!("Roles: {}", roles.join(", ")),
        ),
        None => Reply::failure("None of the listed roles exist on this server."),
    })
}

async fn test_welcome(
    ctx: &Context,
    command: &CommandInteraction,
    shared: &BotShared,
    guild_id: GuildId,
) -> StewardResult<Reply> {
    let Some(settings) = guild_settings::enabled_welcome(
        shared.configs.as_ref(),
        steward_core::GuildId(guild_id.get()),
    )
    .await?
    else {
        return Ok(Reply::failure(
            "Welcome messages are not enabled on this server.",
        ));
    };

    let server = server_name(&ctx.http, guild_id).await?;
    let context = match &command.member {
        Some(member) => member_context(member, server),
        None => MemberContext {
            mention: command.user.mention().to_string(),
            username: command.user.name.clone(),
            server,
            avatar_url: Some(command.user.face()),
        },
    };
    Ok(Reply::Embed(create_embed(&settings.preview_for(&context))))
}

async fn list_configs(shared: &BotShared) -> StewardResult<Reply> {
    let lines = guild_settings::configuration_lines(shared.configs.as_ref()).await?;
    if lines.is_empty() {
        return Ok(Reply::Text("📝 No saved configurations.".to_string()));
    }
    Ok(Reply::success("📋 Saved configurations", lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names() {
        let names: Vec<String> = command_definitions()
            .iter()
            .filter_map(|command| {
                serde_json::to_value(command)
                    .ok()
                    .and_then(|v| v["name"].as_str().map(str::to_string))
            })
            .collect();
        assert_eq!(
            names,
            [
                "setup_server",
                "configure_welcome",
                "configure_autorole",
                "test_welcome",
                "list_configs"
            ]
        );
    }
}
