//! Category and channel phase of a provisioning run.

use crate::{ExistingChannel, GuildCapability, SpecOutcome, SpecReport};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use steward_core::{CategoryHandle, ChannelHandle, ChannelKind, ChannelSpec, RoleHandle};
use steward_error::{ConfigError, PlatformResult};
use tracing::{debug, instrument, warn};

/// What to do when a declared category or channel already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateChannelPolicy {
    /// Always create; re-running a configuration duplicates channels.
    #[default]
    Allow,
    /// Reuse a category with the same name, or a channel with the same
    /// name, kind and parent.
    Reuse,
}

impl FromStr for DuplicateChannelPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "reuse" => Ok(Self::Reuse),
            other => Err(ConfigError::new(format!(
                "Unknown channel policy '{}', expected 'allow' or 'reuse'",
                other
            ))),
        }
    }
}

/// Result of the channel phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelProvisioning {
    /// Category name to handle, for categories created or reused in this run.
    pub categories: HashMap<String, CategoryHandle>,
    /// Channel name to handle, for text and voice channels created or reused.
    pub channels: HashMap<String, ChannelHandle>,
    /// One outcome per declaration, in processing order.
    pub reports: Vec<SpecReport>,
}

/// Create every declared category and channel in position order.
///
/// Declarations are stable-sorted by position, so a category must sort
/// before its children for them to be parented. A child naming a category
/// that has not been created yet becomes a top-level channel. Declarations
/// of unknown kinds are recorded as skipped.
///
/// `_roles` is the role mapping from the role phase; it is accepted so
/// permission overwrites can be added without changing callers.
///
/// # Errors
///
/// Returns an error if a create fails fatally, or if listing channels fails
/// under [`DuplicateChannelPolicy::Reuse`].
#[instrument(skip(guild, specs, _roles), fields(guild_id = %guild.guild_id(), count = specs.len()))]
pub async fn provision_channels(
    guild: &dyn GuildCapability,
    specs: &[ChannelSpec],
    _roles: &HashMap<String, RoleHandle>,
    policy: DuplicateChannelPolicy,
) -> PlatformResult<ChannelProvisioning> {
    let mut existing = match policy {
        DuplicateChannelPolicy::Allow => Vec::new(),
        DuplicateChannelPolicy::Reuse => guild.list_channels().await?,
    };

    let mut ordered: Vec<&ChannelSpec> = specs.iter().collect();
    ordered.sort_by_key(|spec| spec.position());

    let mut result = ChannelProvisioning::default();
    for spec in ordered {
        let name = spec.name();
        let kind = spec.kind();

        let parent = match kind {
            ChannelKind::Category => None,
            _ => spec
                .category()
                .as_ref()
                .and_then(|category| result.categories.get(category).copied()),
        };

        if let ChannelKind::Other(other) = kind {
            debug!(channel = %name, kind = %other, "Unsupported channel kind, skipping");
            result.reports.push(SpecReport::skipped(
                name,
                kind.as_str(),
                format!("Unsupported channel type '{}'", other),
            ));
            continue;
        }

        if let Some(found) = find_existing(&existing, name, kind, parent) {
            debug!(channel = %name, %kind, id = found, "Reusing existing channel");
            record(&mut result, name, kind, found);
            result
                .reports
                .push(SpecReport::new(name, kind.as_str(), SpecOutcome::Reused));
            continue;
        }

        let created = match kind {
            ChannelKind::Category => guild
                .create_category(name, spec.position())
                .await
                .map(|handle| handle.0),
            ChannelKind::Text => guild
                .create_text_channel(name, parent, spec.position())
                .await
                .map(|handle| handle.0),
            ChannelKind::Voice => guild
                .create_voice_channel(name, parent, spec.position())
                .await
                .map(|handle| handle.0),
            ChannelKind::Other(_) => continue,
        };

        match created {
            Ok(id) => {
                debug!(channel = %name, %kind, id, parent = ?parent, "Created channel");
                record(&mut result, name, kind, id);
                if policy == DuplicateChannelPolicy::Reuse {
                    existing.push(ExistingChannel {
                        id,
                        name: name.clone(),
                        kind: kind.clone(),
                        parent,
                    });
                }
                result
                    .reports
                    .push(SpecReport::new(name, kind.as_str(), SpecOutcome::Created));
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!(channel = %name, %kind, error = %e.kind(), "Failed to create channel, skipping");
                result
                    .reports
                    .push(SpecReport::skipped(name, kind.as_str(), e.kind().to_string()));
            }
        }
    }

    Ok(result)
}

fn find_existing(
    existing: &[ExistingChannel],
    name: &str,
    kind: &ChannelKind,
    parent: Option<CategoryHandle>,
) -> Option<u64> {
    existing
        .iter()
        .find(|c| {
            c.name == name
                && &c.kind == kind
                && (matches!(kind, ChannelKind::Category) || c.parent == parent)
        })
        .map(|c| c.id)
}

fn record(result: &mut ChannelProvisioning, name: &str, kind: &ChannelKind, id: u64) {
    match kind {
        ChannelKind::Category => {
            result
                .categories
                .insert(name.to_string(), CategoryHandle(id));
        }
        _ => {
            result.channels.insert(name.to_string(), ChannelHandle(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "Reuse".parse::<DuplicateChannelPolicy>().unwrap(),
            DuplicateChannelPolicy::Reuse
        );
        assert_eq!(
            "allow".parse::<DuplicateChannelPolicy>().unwrap(),
            DuplicateChannelPolicy::Allow
        );
        assert!("sometimes".parse::<DuplicateChannelPolicy>().is_err());
        assert_eq!(DuplicateChannelPolicy::default(), DuplicateChannelPolicy::Allow);
    }
}
