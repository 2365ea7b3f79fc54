//! Role phase of a provisioning run.

use crate::{GuildCapability, SpecOutcome, SpecReport};
use std::collections::HashMap;
use steward_core::{RoleHandle, RoleSpec};
use steward_error::PlatformResult;
use tracing::{debug, instrument, warn};

/// Result of the role phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleProvisioning {
    /// Declared role name to handle, for every role that exists after the phase.
    pub mapping: HashMap<String, RoleHandle>,
    /// One outcome per declaration.
    pub reports: Vec<SpecReport>,
}

/// Create or reuse every declared role.
///
/// Roles are matched by exact name against the server's roles (listed once)
/// and against roles created earlier in this call. A create that fails with a
/// non-fatal error is logged and skipped.
///
/// # Errors
///
/// Returns an error if listing roles fails or a create fails fatally.
#[instrument(skip(guild, specs), fields(guild_id = %guild.guild_id(), count = specs.len()))]
pub async fn provision_roles(
    guild: &dyn GuildCapability,
    specs: &[RoleSpec],
) -> PlatformResult<RoleProvisioning> {
    let mut known: HashMap<String, RoleHandle> = guild
        .list_roles()
        .await?
        .into_iter()
        .map(|role| (role.name, role.handle))
        .collect();
    debug!(existing = known.len(), "Listed server roles");

    let mut result = RoleProvisioning::default();
    for spec in specs {
        let name = spec.name();

        if let Some(handle) = known.get(name) {
            debug!(role = %name, %handle, "Reusing existing role");
            result.mapping.insert(name.clone(), *handle);
            result
                .reports
                .push(SpecReport::new(name, "role", SpecOutcome::Reused));
            continue;
        }

        match guild.create_role(spec).await {
            Ok(handle) => {
                debug!(role = %name, %handle, "Created role");
                known.insert(name.clone(), handle);
                result.mapping.insert(name.clone(), handle);
                result
                    .reports
                    .push(SpecReport::new(name, "role", SpecOutcome::Created));
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!(role = %name, error = %e.kind(), "Failed to create role, skipping");
                result
                    .reports
                    .push(SpecReport::skipped(name, "role", e.kind().to_string()));
            }
        }
    }

    Ok(result)
}
