//! Shared handler state.

use std::sync::Arc;
use steward_provision::{ConfigurationStore, Orchestrator, PlatformConnector};

/// Dependencies shared by every request handler.
#[derive(Clone)]
pub struct ApiState {
    pub(crate) configs: Arc<dyn ConfigurationStore>,
    pub(crate) platform: Arc<dyn PlatformConnector>,
    pub(crate) orchestrator: Orchestrator,
}

impl ApiState {
    /// Creates new API state.
    pub fn new(
        configs: Arc<dyn ConfigurationStore>,
        platform: Arc<dyn PlatformConnector>,
        orchestrator: Orchestrator,
    ) -> Self {
        Self {
            configs,
            platform,
            orchestrator,
        }
    }
}
