//! Sequencing of a provisioning run.

use crate::{
    DuplicateChannelPolicy, GuildCapability, RunMetrics, RunReport, StatusStore, StatusTracker,
    provision_channels, provision_roles,
};
use std::sync::Arc;
use steward_core::{Configuration, GuildId, SetupPhase, StatusId};
use steward_error::{ProvisionError, ProvisionErrorKind, StewardError, StewardResult};
use tokio::task::JoinHandle;
use tracing::{Instrument, error, info, info_span, instrument, warn};

/// Progress reported while roles are created.
const ROLES_PROGRESS: u8 = 10;
/// Progress reported while categories and channels are created.
const CHANNELS_PROGRESS: u8 = 50;

/// Applies configurations to target servers and records their progress.
///
/// A run moves its status through `running(10)` → `running(50)` →
/// `completed(100)`. Any phase-level failure is recorded once as
/// `failed(0)` with the error text and returned to the caller; nothing
/// created before the failure is rolled back.
///
/// Runs are independent. Nothing prevents two runs against the same server
/// from overlapping.
#[derive(Clone)]
pub struct Orchestrator {
    tracker: StatusTracker,
    metrics: RunMetrics,
    policy: DuplicateChannelPolicy,
}

impl Orchestrator {
    /// Create an orchestrator recording statuses in `statuses`.
    pub fn new(statuses: Arc<dyn StatusStore>) -> Self {
        Self {
            tracker: StatusTracker::new(statuses),
            metrics: RunMetrics::new(),
            policy: DuplicateChannelPolicy::default(),
        }
    }

    /// Use `policy` for categories and channels that already exist.
    pub fn with_policy(mut self, policy: DuplicateChannelPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Report into a shared metrics collector.
    pub fn with_metrics(mut self, metrics: RunMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// The status tracker runs report to.
    pub fn tracker(&self) -> &StatusTracker {
        &self.tracker
    }

    /// Run counters.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Duplicate policy in effect.
    pub fn policy(&self) -> DuplicateChannelPolicy {
        self.policy
    }

    /// Create the status record for a run that has not started yet.
    ///
    /// # Errors
    ///
    /// Returns an error if `phase` is terminal or the status store fails.
    pub async fn begin(
        &self,
        guild_id: GuildId,
        config: &Configuration,
        phase: SetupPhase,
        message: &str,
    ) -> StewardResult<StatusId> {
        self.tracker
            .create(guild_id, config.id.clone(), phase, message)
            .await
    }

    /// Apply `config` to `guild`, reporting progress to `status_id`.
    ///
    /// # Errors
    ///
    /// Returns the phase-level failure that aborted the run, after recording
    /// it in the status.
    #[instrument(
        skip(self, guild, config),
        fields(guild_id = %guild.guild_id(), config = %config.name, %status_id)
    )]
    pub async fn run(
        &self,
        guild: &dyn GuildCapability,
        config: &Configuration,
        status_id: &StatusId,
    ) -> StewardResult<RunReport> {
        info!("Starting server setup");
        for warning in config.authoring_warnings() {
            warn!(%warning, "Configuration layout issue");
        }
        self.metrics.record_started();

        match self.run_phases(guild, config, status_id).await {
            Ok(report) => {
                info!(summary = %report.summary(), "Server setup completed");
                self.metrics.record_completed(&report);
                Ok(report)
            }
            Err(e) => {
                let reason = e.reason();
                error!(error = %reason, "Server setup failed");
                self.metrics.record_failed(reason.clone());
                let message = format!("Setup failed: {}", reason);
                if let Err(status_error) = self
                    .tracker
                    .update(status_id, SetupPhase::Failed, 0, message)
                    .await
                {
                    error!(error = %status_error, "Could not record setup failure");
                }
                Err(e)
            }
        }
    }

    async fn run_phases(
        &self,
        guild: &dyn GuildCapability,
        config: &Configuration,
        status_id: &StatusId,
    ) -> StewardResult<RunReport> {
        self.tracker
            .update(
                status_id,
                SetupPhase::Running,
                ROLES_PROGRESS,
                "Creating roles",
            )
            .await?;
        let roles = provision_roles(guild, &config.roles)
            .await
            .map_err(|e| phase_failed("roles", e.kind().to_string()))?;
        info!(roles = roles.mapping.len(), "Role phase finished");

        self.tracker
            .update(
                status_id,
                SetupPhase::Running,
                CHANNELS_PROGRESS,
                "Creating channels and categories",
            )
            .await?;
        let channels = provision_channels(guild, &config.channels, &roles.mapping, self.policy)
            .await
            .map_err(|e| phase_failed("channels", e.kind().to_string()))?;
        info!(
            categories = channels.categories.len(),
            channels = channels.channels.len(),
            "Channel phase finished"
        );

        let report = RunReport {
            roles: roles.reports,
            channels: channels.reports,
        };
        self.tracker
            .update(
                status_id,
                SetupPhase::Completed,
                100,
                format!("Server setup completed: {}", report.summary()),
            )
            .await?;
        Ok(report)
    }

    /// Record a `pending` run and start it in a background task.
    ///
    /// Callers poll the returned status id; the join handle yields the run's
    /// result for callers that want to wait.
    ///
    /// # Errors
    ///
    /// Returns an error if the status record cannot be created; no task is
    /// started in that case.
    pub async fn spawn(
        &self,
        guild: Arc<dyn GuildCapability>,
        config: Configuration,
    ) -> StewardResult<(StatusId, JoinHandle<StewardResult<RunReport>>)> {
        let status_id = self
            .begin(guild.guild_id(), &config, SetupPhase::Pending, "Setup queued")
            .await?;

        let orchestrator = self.clone();
        let id = status_id.clone();
        let span = info_span!("setup_task", status_id = %status_id);
        let handle = tokio::spawn(
            async move { orchestrator.run(guild.as_ref(), &config, &id).await }.instrument(span),
        );
        Ok((status_id, handle))
    }

    /// Record a `running` run and wait for it to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the status record cannot be created or the run
    /// fails.
    pub async fn provision(
        &self,
        guild: &dyn GuildCapability,
        config: &Configuration,
    ) -> StewardResult<(StatusId, RunReport)> {
        let status_id = self
            .begin(
                guild.guild_id(),
                config,
                SetupPhase::Running,
                "Starting server setup",
            )
            .await?;
        let report = self.run(guild, config, &status_id).await?;
        Ok((status_id, report))
    }
}

#[track_caller]
fn phase_failed(phase: &str, reason: String) -> StewardError {
    ProvisionError::new(ProvisionErrorKind::PhaseFailed {
        phase: phase.to_string(),
        reason,
    })
    .into()
}
