//! Optional per-configuration feature settings.

use crate::Color;
use serde::{Deserialize, Serialize};

/// Greeting behaviour for members joining and leaving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeSettings {
    /// Whether join greetings are sent.
    #[serde(default)]
    pub enabled: bool,

    /// Channel name for join greetings.
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Join message template.
    #[serde(default = "default_welcome_message")]
    pub message: String,

    /// Send greetings as embeds instead of plain messages.
    #[serde(default = "default_true")]
    pub use_embed: bool,

    /// Embed title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Embed color.
    #[serde(default = "default_color")]
    pub color: Color,

    /// Show the member's avatar as the embed thumbnail.
    #[serde(default)]
    pub thumbnail: bool,

    /// Embed footer text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,

    /// Whether leave messages are sent.
    #[serde(default)]
    pub goodbye_enabled: bool,

    /// Channel name for leave messages.
    #[serde(default = "default_channel")]
    pub goodbye_channel: String,

    /// Leave message template.
    #[serde(default = "default_goodbye_message")]
    pub goodbye_message: String,
}

fn default_channel() -> String {
    "welcome".to_string()
}

fn default_welcome_message() -> String {
    "Welcome {user} to {server}! 🎉".to_string()
}

fn default_goodbye_message() -> String {
    "Goodbye {username}! 👋".to_string()
}

fn default_title() -> String {
    "Welcome! 🎉".to_string()
}

fn default_color() -> Color {
    Color::GREEN
}

fn default_true() -> bool {
    true
}

impl Default for WelcomeSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            channel: default_channel(),
            message: default_welcome_message(),
            use_embed: true,
            title: default_title(),
            color: default_color(),
            thumbnail: false,
            footer: None,
            goodbye_enabled: false,
            goodbye_channel: default_channel(),
            goodbye_message: default_goodbye_message(),
        }
    }
}

/// Roles handed to every member on join.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoRoleSettings {
    /// Whether roles are assigned.
    #[serde(default)]
    pub enabled: bool,

    /// Role names to assign.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl AutoRoleSettings {
    /// Enabled settings assigning the given roles.
    pub fn with_roles(roles: Vec<String>) -> Self {
        Self {
            enabled: true,
            roles,
        }
    }

    /// Role names to assign; empty when disabled.
    pub fn roles_to_assign(&self) -> &[String] {
        if self.enabled { &self.roles } else { &[] }
    }
}

/// Moderation options, stored but not interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModerationSettings {
    /// Whether moderation is switched on.
    #[serde(default)]
    pub enabled: bool,

    /// Remaining options, kept verbatim.
    #[serde(flatten)]
    pub options: serde_json::Map<String, serde_json::Value>,
}
