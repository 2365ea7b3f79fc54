//! Serenity event handler for the Steward bot.
//!
//! Greets members as they join or leave, assigns automatic roles and
//! dispatches slash commands.

use crate::commands::{command_definitions, handle_command};
use crate::connection::BotShared;
use crate::embeds::create_message;
use crate::error::platform_error;
use serenity::all::{
    ChannelType, Command, GuildId, Http, Interaction, Member, Mentionable, Ready, User,
};
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::gateway::GatewayIntents;
use std::sync::Arc;
use steward_core::{Greeting, MemberContext};
use steward_error::{PlatformResult, StewardResult};
use tracing::{debug, error, info, instrument, warn};

/// Event handler for the Steward Discord bot.
pub struct StewardHandler {
    shared: Arc<BotShared>,
}

impl StewardHandler {
    pub(crate) fn new(shared: Arc<BotShared>) -> Self {
        Self { shared }
    }

    /// Required gateway intents for the bot.
    ///
    /// Member events need the privileged `GUILD_MEMBERS` intent enabled in
    /// the Developer Portal.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS
    }

    #[instrument(skip_all, fields(guild_id = %member.guild_id, user_id = %member.user.id))]
    async fn send_welcome(&self, ctx: &Context, member: &Member) -> StewardResult<()> {
        let Some(settings) = crate::guild_settings::enabled_welcome(
            self.shared.configs.as_ref(),
            steward_core::GuildId(member.guild_id.get()),
        )
        .await?
        else {
            return Ok(());
        };

        let server = server_name(&ctx.http, member.guild_id).await?;
        let context = member_context(member, server);
        if let Some(greeting) = settings.welcome_for(&context) {
            deliver(&ctx.http, member.guild_id, &greeting).await?;
        }
        Ok(())
    }

    #[instrument(skip_all, fields(guild_id = %member.guild_id, user_id = %member.user.id))]
    async fn assign_auto_roles(&self, ctx: &Context, member: &Member) -> StewardResult<()> {
        let config = self
            .shared
            .configs
            .find_by_guild(steward_core::GuildId(member.guild_id.get()))
            .await?;
        let Some(settings) = config
            .and_then(|config| config.auto_role_settings)
            .filter(|settings| settings.enabled)
        else {
            return Ok(());
        };

        let roles = ctx
            .http
            .get_guild_roles(member.guild_id)
            .await
            .map_err(|e| platform_error(member.guild_id.get(), e))?;

        for name in settings.roles_to_assign() {
            let Some(role) = roles.iter().find(|role| &role.name == name) else {
                warn!(role = %name, "Automatic role does not exist on server");
                continue;
            };
            match member.add_role(&ctx.http, role.id).await {
                Ok(()) => debug!(role = %name, "Assigned automatic role"),
                Err(e) => warn!(role = %name, error = %e, "Failed to assign automatic role"),
            }
        }
        Ok(())
    }

    #[instrument(skip_all, fields(%guild_id, user_id = %user.id))]
    async fn send_goodbye(&self, ctx: &Context, guild_id: GuildId, user: &User) -> StewardResult<()> {
        let Some(settings) = crate::guild_settings::enabled_welcome(
            self.shared.configs.as_ref(),
            steward_core::GuildId(guild_id.get()),
        )
        .await?
        else {
            return Ok(());
        };

        let server = server_name(&ctx.http, guild_id).await?;
        let context = MemberContext {
            mention: user.mention().to_string(),
            username: user.global_name.clone().unwrap_or_else(|| user.name.clone()),
            server,
            avatar_url: Some(user.face()),
        };
        if let Some(greeting) = settings.goodbye_for(&context) {
            deliver(&ctx.http, guild_id, &greeting).await?;
        }
        Ok(())
    }
}

/// Name of a server as shown in greetings.
pub(crate) async fn server_name(http: &Http, guild_id: GuildId) -> PlatformResult<String> {
    http.get_guild(guild_id)
        .await
        .map(|guild| guild.name)
        .map_err(|e| platform_error(guild_id.get(), e))
}

/// Template values for a server member.
pub(crate) fn member_context(member: &Member, server: String) -> MemberContext {
    MemberContext {
        mention: member.mention().to_string(),
        username: member.display_name().to_string(),
        server,
        avatar_url: Some(member.face()),
    }
}

/// Post a greeting to the text channel it names.
async fn deliver(http: &Http, guild_id: GuildId, greeting: &Greeting) -> PlatformResult<()> {
    let channels = http
        .get_channels(guild_id)
        .await
        .map_err(|e| platform_error(guild_id.get(), e))?;
    let Some(channel) = channels
        .iter()
        .find(|c| c.kind == ChannelType::Text && c.name == greeting.channel)
    else {
        warn!(channel = %greeting.channel, "Greeting channel not found");
        return Ok(());
    };

    channel
        .id
        .send_message(http, create_message(&greeting.body))
        .await
        .map_err(|e| platform_error(guild_id.get(), e))?;
    debug!(channel = %greeting.channel, "Greeting sent");
    Ok(())
}

#[async_trait]
impl EventHandler for StewardHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            bot_name = %ready.user.name,
            guilds = ready.guilds.len(),
            "Discord bot connected"
        );
        self.shared.mark_connected();

        match Command::set_global_commands(&ctx.http, command_definitions()).await {
            Ok(commands) => info!(count = commands.len(), "Registered slash commands"),
            Err(e) => error!(error = %e, "Failed to register slash commands"),
        }
    }

    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        if let Err(e) = self.send_welcome(&ctx, &new_member).await {
            error!(error = %e, "Failed to send welcome message");
        }
        if let Err(e) = self.assign_auto_roles(&ctx, &new_member).await {
            error!(error = %e, "Failed to assign automatic roles");
        }
    }

    async fn guild_member_removal(
        &self,
        ctx: Context,
        guild_id: GuildId,
        user: User,
        _member_data_if_available: Option<Member>,
    ) {
        if let Err(e) = self.send_goodbye(&ctx, guild_id, &user).await {
            error!(error = %e, "Failed to send goodbye message");
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Command(command) = interaction {
            handle_command(&ctx, &command, &self.shared).await;
        }
    }
}
