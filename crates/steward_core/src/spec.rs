//! Declarations of the roles and channels a configuration provisions.

use crate::Color;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::fmt;
use steward_error::ValidationError;

/// A role to create or reuse on the target server.
///
/// # Examples
///
/// ```
/// use steward_core::{Color, RoleSpec};
///
/// let spec = RoleSpec::builder()
///     .name("Moderator")
///     .color(Color::GREEN)
///     .permissions(8u64)
///     .hoist(true)
///     .build()
///     .unwrap();
/// assert_eq!(spec.name(), "Moderator");
/// assert!(!spec.mentionable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct RoleSpec {
    /// Role name, unique within one configuration.
    name: String,

    /// Display color.
    #[builder(default)]
    #[serde(default)]
    color: Color,

    /// Permission bitmask.
    #[builder(default)]
    #[serde(default)]
    permissions: u64,

    /// Whether members are listed separately.
    #[builder(default)]
    #[serde(default)]
    #[getter(copy)]
    hoist: bool,

    /// Whether anyone can mention the role.
    #[builder(default)]
    #[serde(default)]
    #[getter(copy)]
    mentionable: bool,
}

impl RoleSpec {
    /// Start building a role declaration.
    pub fn builder() -> RoleSpecBuilder {
        RoleSpecBuilder::default()
    }

    /// Shorthand for a role with default attributes.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: Color::default(),
            permissions: 0,
            hoist: false,
            mentionable: false,
        }
    }
}

impl RoleSpecBuilder {
    /// Build the role declaration.
    ///
    /// # Errors
    ///
    /// Returns an error if the name was not set.
    pub fn build(&self) -> Result<RoleSpec, ValidationError> {
        self.build_internal()
            .map_err(|e| ValidationError::new(e.to_string()))
    }
}

/// Kind of a declared channel.
///
/// Unrecognized kinds are preserved so they can be reported as skipped
/// rather than rejected when the document is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChannelKind {
    /// A category grouping other channels.
    Category,
    /// A text channel.
    Text,
    /// A voice channel.
    Voice,
    /// Any other kind, kept verbatim.
    Other(String),
}

impl ChannelKind {
    /// Wire name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            ChannelKind::Category => "category",
            ChannelKind::Text => "text",
            ChannelKind::Voice => "voice",
            ChannelKind::Other(kind) => kind,
        }
    }
}

impl From<String> for ChannelKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "category" => ChannelKind::Category,
            "text" => ChannelKind::Text,
            "voice" => ChannelKind::Voice,
            _ => ChannelKind::Other(value),
        }
    }
}

impl From<&str> for ChannelKind {
    fn from(value: &str) -> Self {
        ChannelKind::from(value.to_string())
    }
}

impl From<ChannelKind> for String {
    fn from(kind: ChannelKind) -> Self {
        match kind {
            ChannelKind::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category, text channel or voice channel to create on the target server.
///
/// # Examples
///
/// ```
/// use steward_core::{ChannelKind, ChannelSpec};
///
/// let spec: ChannelSpec = serde_json::from_str(
///     r#"{"name": "general", "type": "text", "category": "Lobby", "position": 1}"#,
/// ).unwrap();
/// assert_eq!(spec.kind(), &ChannelKind::Text);
/// assert_eq!(spec.category().as_deref(), Some("Lobby"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct ChannelSpec {
    /// Channel name.
    name: String,

    /// Channel kind.
    #[serde(rename = "type")]
    kind: ChannelKind,

    /// Name of the parent category, if any.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,

    /// Sort key; lower positions are created first.
    #[builder(default)]
    #[serde(default)]
    #[getter(copy)]
    position: i32,
}

impl ChannelSpec {
    /// Start building a channel declaration.
    pub fn builder() -> ChannelSpecBuilder {
        ChannelSpecBuilder::default()
    }

    /// A category declaration.
    pub fn category_named(name: impl Into<String>, position: i32) -> Self {
        Self {
            name: name.into(),
            kind: ChannelKind::Category,
            category: None,
            position,
        }
    }

    /// A text channel declaration.
    pub fn text(name: impl Into<String>, category: Option<&str>, position: i32) -> Self {
        Self {
            name: name.into(),
            kind: ChannelKind::Text,
            category: category.map(str::to_string),
            position,
        }
    }

    /// A voice channel declaration.
    pub fn voice(name: impl Into<String>, category: Option<&str>, position: i32) -> Self {
        Self {
            name: name.into(),
            kind: ChannelKind::Voice,
            category: category.map(str::to_string),
            position,
        }
    }
}

impl ChannelSpecBuilder {
    /// Build the channel declaration.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or kind was not set.
    pub fn build(&self) -> Result<ChannelSpec, ValidationError> {
        self.build_internal()
            .map_err(|e| ValidationError::new(e.to_string()))
    }
}
