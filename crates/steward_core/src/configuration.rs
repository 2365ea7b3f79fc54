//! Declarative server configuration documents.

use crate::{
    AutoRoleSettings, ChannelKind, ChannelSpec, ConfigurationId, GuildId, ModerationSettings,
    RoleSpec, WelcomeSettings,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use steward_error::ValidationError;

/// The editable contents of a configuration, as submitted by authors.
///
/// Drafts carry no identity or timestamps; the store assigns those when the
/// draft becomes a [`Configuration`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationDraft {
    /// Unique human-readable name.
    pub name: String,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// Server icon URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,

    /// Roles in declaration order.
    #[serde(default)]
    pub roles: Vec<RoleSpec>,

    /// Channels and categories in declaration order.
    #[serde(default)]
    pub channels: Vec<ChannelSpec>,

    /// Join and leave greetings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_settings: Option<WelcomeSettings>,

    /// Roles assigned on join.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_role_settings: Option<AutoRoleSettings>,

    /// Moderation options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderation_settings: Option<ModerationSettings>,
}

impl ConfigurationDraft {
    /// Check the draft for authoring errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, a role or channel name is blank,
    /// or two roles share a name.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("Configuration name must not be empty"));
        }

        let mut seen = HashSet::new();
        for role in &self.roles {
            if role.name().trim().is_empty() {
                return Err(ValidationError::new("Role names must not be empty"));
            }
            if !seen.insert(role.name().as_str()) {
                return Err(ValidationError::new(format!(
                    "Duplicate role name '{}' in configuration '{}'",
                    role.name(),
                    self.name
                )));
            }
        }

        if self.channels.iter().any(|c| c.name().trim().is_empty()) {
            return Err(ValidationError::new("Channel names must not be empty"));
        }

        Ok(())
    }
}

/// A stored server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Store-assigned identifier.
    pub id: ConfigurationId,

    /// Unique human-readable name.
    pub name: String,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// Server icon URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,

    /// Roles in declaration order.
    #[serde(default)]
    pub roles: Vec<RoleSpec>,

    /// Channels and categories in declaration order.
    #[serde(default)]
    pub channels: Vec<ChannelSpec>,

    /// Join and leave greetings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_settings: Option<WelcomeSettings>,

    /// Roles assigned on join.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_role_settings: Option<AutoRoleSettings>,

    /// Moderation options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderation_settings: Option<ModerationSettings>,

    /// Server this configuration was last applied to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,

    /// Creation time.
    pub created_at: DateTime<Utc>,

    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Configuration {
    /// Turn a validated draft into a new configuration with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft fails [`ConfigurationDraft::validate`].
    pub fn from_draft(draft: ConfigurationDraft) -> Result<Self, ValidationError> {
        draft.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: ConfigurationId::generate(),
            name: draft.name,
            description: draft.description,
            icon_url: draft.icon_url,
            roles: draft.roles,
            channels: draft.channels,
            welcome_settings: draft.welcome_settings,
            auto_role_settings: draft.auto_role_settings,
            moderation_settings: draft.moderation_settings,
            guild_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the editable contents, keeping identity, binding and creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft fails validation; `self` is untouched.
    pub fn apply_draft(&mut self, draft: ConfigurationDraft) -> Result<(), ValidationError> {
        draft.validate()?;
        self.name = draft.name;
        self.description = draft.description;
        self.icon_url = draft.icon_url;
        self.roles = draft.roles;
        self.channels = draft.channels;
        self.welcome_settings = draft.welcome_settings;
        self.auto_role_settings = draft.auto_role_settings;
        self.moderation_settings = draft.moderation_settings;
        self.touch();
        Ok(())
    }

    /// Bump the modification time.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Look for declarations that will not provision the way they read.
    ///
    /// Channels are created in position order, so a channel whose category
    /// sorts after it (or is not declared at all) ends up at the top level.
    pub fn authoring_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (child_index, child) in self.channels.iter().enumerate() {
            if matches!(child.kind(), ChannelKind::Category) {
                continue;
            }
            let Some(parent_name) = child.category() else {
                continue;
            };

            let parent = self.channels.iter().enumerate().find(|(_, c)| {
                matches!(c.kind(), ChannelKind::Category) && c.name() == parent_name
            });

            match parent {
                None => warnings.push(format!(
                    "Channel '{}' references undeclared category '{}' and will be created at the top level",
                    child.name(),
                    parent_name
                )),
                Some((parent_index, parent)) => {
                    let sorts_first = child.position() < parent.position()
                        || (child.position() == parent.position() && child_index < parent_index);
                    if sorts_first {
                        warnings.push(format!(
                            "Channel '{}' (position {}) sorts before its category '{}' (position {}) and will be created at the top level",
                            child.name(),
                            child.position(),
                            parent_name,
                            parent.position()
                        ));
                    }
                }
            }
        }

        warnings
    }
}
