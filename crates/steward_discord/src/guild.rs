//! Provisioning capability backed by the Discord REST API.

use crate::error::platform_error;
use async_trait::async_trait;
use serenity::all::{ChannelId, ChannelType, CreateChannel, EditRole, Http, Permissions};
use std::sync::Arc;
use steward_core::{CategoryHandle, ChannelHandle, ChannelKind, GuildId, RoleHandle, RoleSpec};
use steward_error::PlatformResult;
use steward_provision::{ExistingChannel, ExistingRole, GuildCapability};
use tracing::{debug, instrument};

/// A Discord guild reached through serenity's HTTP client.
///
/// Serenity already honours Discord's rate-limit headers; wrap this in a
/// [`ThrottledGuild`](steward_provision::ThrottledGuild) to additionally
/// pace create calls.
#[derive(Clone)]
pub struct DiscordGuild {
    http: Arc<Http>,
    guild_id: serenity::all::GuildId,
}

impl DiscordGuild {
    /// Capability for `guild_id` using a shared HTTP client.
    pub fn new(http: Arc<Http>, guild_id: GuildId) -> Self {
        Self {
            http,
            guild_id: serenity::all::GuildId::new(guild_id.get()),
        }
    }

    /// Capability with its own HTTP client, for use without a gateway session.
    pub fn with_token(token: &str, guild_id: GuildId) -> Self {
        Self::new(Arc::new(Http::new(token)), guild_id)
    }

    async fn create_channel(
        &self,
        name: &str,
        kind: ChannelType,
        parent: Option<CategoryHandle>,
        position: i32,
    ) -> PlatformResult<u64> {
        let mut builder = CreateChannel::new(name)
            .kind(kind)
            .position(position.clamp(0, i32::from(u16::MAX)) as u16);
        if let Some(parent) = parent {
            builder = builder.category(ChannelId::new(parent.0));
        }

        let channel = self
            .guild_id
            .create_channel(&self.http, builder)
            .await
            .map_err(|e| platform_error(self.guild_id.get(), e))?;
        debug!(channel_id = %channel.id, "Discord channel created");
        Ok(channel.id.get())
    }
}

fn channel_kind(kind: ChannelType) -> ChannelKind {
    ChannelKind::from(kind.name())
}

#[async_trait]
impl GuildCapability for DiscordGuild {
    fn guild_id(&self) -> GuildId {
        GuildId(self.guild_id.get())
    }

    #[instrument(skip(self), fields(guild_id = %self.guild_id))]
    async fn list_roles(&self) -> PlatformResult<Vec<ExistingRole>> {
        let roles = self
            .http
            .get_guild_roles(self.guild_id)
            .await
            .map_err(|e| platform_error(self.guild_id.get(), e))?;
        debug!(count = roles.len(), "Fetched roles");
        Ok(roles
            .into_iter()
            .map(|role| ExistingRole {
                handle: RoleHandle(role.id.get()),
                name: role.name,
            })
            .collect())
    }

    #[instrument(skip(self, spec), fields(guild_id = %self.guild_id, role = %spec.name()))]
    async fn create_role(&self, spec: &RoleSpec) -> PlatformResult<RoleHandle> {
        let builder = EditRole::new()
            .name(spec.name())
            .permissions(Permissions::from_bits_truncate(*spec.permissions()))
            .colour(spec.color().value())
            .hoist(spec.hoist())
            .mentionable(spec.mentionable());

        let role = self
            .guild_id
            .create_role(&self.http, builder)
            .await
            .map_err(|e| platform_error(self.guild_id.get(), e))?;
        debug!(role_id = %role.id, "Discord role created");
        Ok(RoleHandle(role.id.get()))
    }

    #[instrument(skip(self), fields(guild_id = %self.guild_id))]
    async fn list_channels(&self) -> PlatformResult<Vec<ExistingChannel>> {
        let channels = self
            .http
            .get_channels(self.guild_id)
            .await
            .map_err(|e| platform_error(self.guild_id.get(), e))?;
        debug!(count = channels.len(), "Fetched channels");
        Ok(channels
            .into_iter()
            .map(|channel| ExistingChannel {
                id: channel.id.get(),
                name: channel.name,
                kind: channel_kind(channel.kind),
                parent: channel.parent_id.map(|id| CategoryHandle(id.get())),
            })
            .collect())
    }

    #[instrument(skip(self), fields(guild_id = %self.guild_id))]
    async fn create_category(&self, name: &str, position: i32) -> PlatformResult<CategoryHandle> {
        self.create_channel(name, ChannelType::Category, None, position)
            .await
            .map(CategoryHandle)
    }

    #[instrument(skip(self), fields(guild_id = %self.guild_id))]
    async fn create_text_channel(
        &self,
        name: &str,
        parent: Option<CategoryHandle>,
        position: i32,
    ) -> PlatformResult<ChannelHandle> {
        self.create_channel(name, ChannelType::Text, parent, position)
            .await
            .map(ChannelHandle)
    }

    #[instrument(skip(self), fields(guild_id = %self.guild_id))]
    async fn create_voice_channel(
        &self,
        name: &str,
        parent: Option<CategoryHandle>,
        position: i32,
    ) -> PlatformResult<ChannelHandle> {
        self.create_channel(name, ChannelType::Voice, parent, position)
            .await
            .map(ChannelHandle)
    }
}
