//! Capability interface to a single target server.

use async_trait::async_trait;
use steward_core::{CategoryHandle, ChannelHandle, ChannelKind, GuildId, RoleHandle, RoleSpec};
use steward_error::PlatformResult;

/// A role already present on the target server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingRole {
    /// Role handle.
    pub handle: RoleHandle,
    /// Role name.
    pub name: String,
}

/// A channel or category already present on the target server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingChannel {
    /// Snowflake id of the channel.
    pub id: u64,
    /// Channel name.
    pub name: String,
    /// Channel kind.
    pub kind: ChannelKind,
    /// Parent category, if any.
    pub parent: Option<CategoryHandle>,
}

/// Operations the provisioners need from a target server.
///
/// Every method is one remote call. Implementations report failures as
/// [`PlatformError`](steward_error::PlatformError)s whose
/// [`is_fatal`](steward_error::PlatformError::is_fatal) tells the caller
/// whether further calls against this target can succeed.
#[async_trait]
pub trait GuildCapability: Send + Sync {
    /// Id of the target server.
    fn guild_id(&self) -> GuildId;

    /// List the server's roles.
    async fn list_roles(&self) -> PlatformResult<Vec<ExistingRole>>;

    /// Create a role with the declared attributes.
    async fn create_role(&self, spec: &RoleSpec) -> PlatformResult<RoleHandle>;

    /// List the server's channels and categories.
    async fn list_channels(&self) -> PlatformResult<Vec<ExistingChannel>>;

    /// Create a category.
    async fn create_category(&self, name: &str, position: i32) -> PlatformResult<CategoryHandle>;

    /// Create a text channel, optionally inside a category.
    async fn create_text_channel(
        &self,
        name: &str,
        parent: Option<CategoryHandle>,
        position: i32,
    ) -> PlatformResult<ChannelHandle>;

    /// Create a voice channel, optionally inside a category.
    async fn create_voice_channel(
        &self,
        name: &str,
        parent: Option<CategoryHandle>,
        position: i32,
    ) -> PlatformResult<ChannelHandle>;
}
