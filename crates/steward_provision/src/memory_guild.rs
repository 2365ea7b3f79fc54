//! In-memory target server for tests and dry runs.

use crate::{ExistingChannel, ExistingRole, GuildCapability};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use steward_core::{CategoryHandle, ChannelHandle, ChannelKind, GuildId, RoleHandle, RoleSpec};
use steward_error::{PlatformError, PlatformErrorKind, PlatformResult};

/// A call received by an [`InMemoryGuild`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuildCall {
    /// `list_roles`
    ListRoles,
    /// `create_role`
    CreateRole(String),
    /// `list_channels`
    ListChannels,
    /// `create_category`
    CreateCategory {
        /// Category name
        name: String,
        /// Requested position
        position: i32,
    },
    /// `create_text_channel`
    CreateText {
        /// Channel name
        name: String,
        /// Parent category
        parent: Option<CategoryHandle>,
        /// Requested position
        position: i32,
    },
    /// `create_voice_channel`
    CreateVoice {
        /// Channel name
        name: String,
        /// Parent category
        parent: Option<CategoryHandle>,
        /// Requested position
        position: i32,
    },
}

impl GuildCall {
    /// Whether the call creates an entity.
    pub fn is_create(&self) -> bool {
        !matches!(self, GuildCall::ListRoles | GuildCall::ListChannels)
    }
}

#[derive(Debug, Default)]
struct GuildState {
    next_id: u64,
    roles: Vec<ExistingRole>,
    channels: Vec<ExistingChannel>,
    calls: Vec<GuildCall>,
    failures: HashMap<String, PlatformErrorKind>,
    list_failure: Option<PlatformErrorKind>,
}

impl GuildState {
    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn check(&self, name: &str) -> PlatformResult<()> {
        match self.failures.get(name) {
            Some(kind) => Err(PlatformError::new(kind.clone())),
            None => Ok(()),
        }
    }

    fn check_list(&self) -> PlatformResult<()> {
        match &self.list_failure {
            Some(kind) => Err(PlatformError::new(kind.clone())),
            None => Ok(()),
        }
    }
}

/// Target server held in memory.
///
/// Records every call it receives and can be told to fail creates for
/// particular names or to fail listing, which makes it the test double for
/// the provisioners and the backend for `--dry-run`.
///
/// # Example
///
/// ```
/// use steward_core::GuildId;
/// use steward_error::PlatformErrorKind;
/// use steward_provision::InMemoryGuild;
///
/// let guild = InMemoryGuild::new(GuildId(7))
///     .with_role("Admin")
///     .fail_create("Moderator", PlatformErrorKind::PermissionDenied("Manage Roles".into()));
/// assert_eq!(guild.roles().len(), 1);
/// ```
#[derive(Debug)]
pub struct InMemoryGuild {
    guild_id: GuildId,
    state: Mutex<GuildState>,
}

impl InMemoryGuild {
    /// An empty server.
    pub fn new(guild_id: GuildId) -> Self {
        Self {
            guild_id,
            state: Mutex::new(GuildState {
                next_id: guild_id.get().saturating_mul(1000),
                ..Default::default()
            }),
        }
    }

    /// Add a pre-existing role.
    pub fn with_role(self, name: impl Into<String>) -> Self {
        {
            let mut state = self.state.lock();
            let id = state.allocate();
            state.roles.push(ExistingRole {
                handle: RoleHandle(id),
                name: name.into(),
            });
        }
        self
    }

    /// Add a pre-existing channel or category.
    pub fn with_channel(
        self,
        name: impl Into<String>,
        kind: ChannelKind,
        parent: Option<CategoryHandle>,
    ) -> Self {
        {
            let mut state = self.state.lock();
            let id = state.allocate();
            state.channels.push(ExistingChannel {
                id,
                name: name.into(),
                kind,
                parent,
            });
        }
        self
    }

    /// Make every create call for `name` fail with `kind`.
    pub fn fail_create(self, name: impl Into<String>, kind: PlatformErrorKind) -> Self {
        self.state.lock().failures.insert(name.into(), kind);
        self
    }

    /// Make listing roles and channels fail with `kind`.
    pub fn fail_listing(self, kind: PlatformErrorKind) -> Self {
        self.state.lock().list_failure = Some(kind);
        self
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<GuildCall> {
        self.state.lock().calls.clone()
    }

    /// Number of create calls received so far, including failed ones.
    pub fn create_calls(&self) -> usize {
        self.state.lock().calls.iter().filter(|c| c.is_create()).count()
    }

    /// Current roles.
    pub fn roles(&self) -> Vec<ExistingRole> {
        self.state.lock().roles.clone()
    }

    /// Current channels and categories.
    pub fn channels(&self) -> Vec<ExistingChannel> {
        self.state.lock().channels.clone()
    }

    /// Look up a channel or category by name.
    pub fn channel_named(&self, name: &str) -> Option<ExistingChannel> {
        self.state
            .lock()
            .channels
            .iter()
            .find(|c| c.name == name)
            .cloned()
    }

    fn create_channel(
        &self,
        call: GuildCall,
        name: &str,
        kind: ChannelKind,
        parent: Option<CategoryHandle>,
    ) -> PlatformResult<u64> {
        let mut state = self.state.lock();
        state.calls.push(call);
        state.check(name)?;
        let id = state.allocate();
        state.channels.push(ExistingChannel {
            id,
            name: name.to_string(),
            kind,
            parent,
        });
        Ok(id)
    }
}

#[async_trait]
impl GuildCapability for InMemoryGuild {
    fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    async fn list_roles(&self) -> PlatformResult<Vec<ExistingRole>> {
        let mut state = self.state.lock();
        state.calls.push(GuildCall::ListRoles);
        state.check_list()?;
        Ok(state.roles.clone())
    }

    async fn create_role(&self, spec: &RoleSpec) -> PlatformResult<RoleHandle> {
        let mut state = self.state.lock();
        state.calls.push(GuildCall::CreateRole(spec.name().clone()));
        state.check(spec.name())?;
        let handle = RoleHandle(state.allocate());
        state.roles.push(ExistingRole {
            handle,
            name: spec.name().clone(),
        });
        Ok(handle)
    }

    async fn list_channels(&self) -> PlatformResult<Vec<ExistingChannel>> {
        let mut state = self.state.lock();
        state.calls.push(GuildCall::ListChannels);
        state.check_list()?;
        Ok(state.channels.clone())
    }

    async fn create_category(&self, name: &str, position: i32) -> PlatformResult<CategoryHandle> {
        let call = GuildCall::CreateCategory {
            name: name.to_string(),
            position,
        };
        self.create_channel(call, name, ChannelKind::Category, None)
            .map(CategoryHandle)
    }

    async fn create_text_channel(
        &self,
        name: &str,
        parent: Option<CategoryHandle>,
        position: i32,
    ) -> PlatformResult<ChannelHandle> {
        let call = GuildCall::CreateText {
            name: name.to_string(),
            parent,
            position,
        };
        self.create_channel(call, name, ChannelKind::Text, parent)
            .map(ChannelHandle)
    }

    async fn create_voice_channel(
        &self,
        name: &str,
        parent: Option<CategoryHandle>,
        position: i32,
    ) -> PlatformResult<ChannelHandle> {
        let call = GuildCall::CreateVoice {
            name: name.to_string(),
            parent,
            position,
        };
        self.create_channel(call, name, ChannelKind::Voice, parent)
            .map(ChannelHandle)
    }
}
