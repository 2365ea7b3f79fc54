//! Document and target identifiers.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use steward_error::ValidationError;

/// Identifier of a stored configuration document.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
#[display("{}", _0)]
pub struct ConfigurationId(pub String);

impl ConfigurationId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConfigurationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier of a setup status record.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
#[display("{}", _0)]
pub struct StatusId(pub String);

impl StatusId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StatusId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Snowflake id of a target server (Discord guild).
///
/// Serialized as a string because snowflakes overflow JavaScript numbers;
/// deserializes from either a string or an integer.
///
/// # Examples
///
/// ```
/// use steward_core::GuildId;
///
/// let id: GuildId = "123456789012345678".parse().unwrap();
/// assert_eq!(id.get(), 123456789012345678);
/// assert!("not-a-number".parse::<GuildId>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(try_from = "RawSnowflake", into = "String")]
#[display("{}", _0)]
pub struct GuildId(pub u64);

impl GuildId {
    /// Numeric snowflake value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl FromStr for GuildId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ValidationError::new(format!("Invalid guild id: {}", s)))
    }
}

impl From<GuildId> for String {
    fn from(id: GuildId) -> Self {
        id.0.to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSnowflake {
    Text(String),
    Number(u64),
}

impl TryFrom<RawSnowflake> for GuildId {
    type Error = ValidationError;

    fn try_from(raw: RawSnowflake) -> Result<Self, Self::Error> {
        match raw {
            RawSnowflake::Text(text) => text.parse(),
            RawSnowflake::Number(n) => Ok(Self(n)),
        }
    }
}
