//! Progress records for provisioning runs.

use crate::{ConfigurationId, GuildId, StatusId};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use steward_error::{ProvisionError, ProvisionErrorKind, ProvisionResult};

/// Lifecycle phase of a provisioning run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum SetupPhase {
    /// Accepted, not yet started.
    #[display("pending")]
    Pending,
    /// Creating entities.
    #[display("running")]
    Running,
    /// Finished successfully.
    #[display("completed")]
    Completed,
    /// Aborted by a phase-level failure.
    #[display("failed")]
    Failed,
}

impl SetupPhase {
    /// Whether the phase is final.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SetupPhase::Completed | SetupPhase::Failed)
    }

    /// Whether a run may move from `self` to `next`.
    ///
    /// ```
    /// use steward_core::SetupPhase;
    ///
    /// assert!(SetupPhase::Pending.can_transition_to(SetupPhase::Running));
    /// assert!(!SetupPhase::Completed.can_transition_to(SetupPhase::Running));
    /// assert!(!SetupPhase::Running.can_transition_to(SetupPhase::Pending));
    /// ```
    pub fn can_transition_to(&self, next: SetupPhase) -> bool {
        use SetupPhase::*;
        matches!(
            (self, next),
            (Pending, Running) | (Pending, Failed) | (Running, Running | Completed | Failed)
        )
    }
}

/// Status of one provisioning run, as polled by callers.
///
/// Fields are only mutated through [`SetupStatus::apply`], which enforces the
/// phase transition table and progress bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct SetupStatus {
    /// Record identifier.
    id: StatusId,

    /// Target server.
    guild_id: GuildId,

    /// Configuration being applied.
    config_id: ConfigurationId,

    /// Current phase.
    #[serde(rename = "status")]
    #[getter(copy)]
    phase: SetupPhase,

    /// Percent complete, 0 to 100.
    #[getter(copy)]
    progress: u8,

    /// Human-readable progress or error text.
    message: String,

    /// When the record was created.
    started_at: DateTime<Utc>,

    /// When the record last changed.
    updated_at: DateTime<Utc>,

    /// When a terminal phase was reached.
    #[serde(default)]
    completed_at: Option<DateTime<Utc>>,
}

impl SetupStatus {
    /// Create a record at 0% in `pending` or `running`.
    ///
    /// # Errors
    ///
    /// Returns an error if `phase` is terminal.
    #[track_caller]
    pub fn new(
        guild_id: GuildId,
        config_id: ConfigurationId,
        phase: SetupPhase,
        message: impl Into<String>,
    ) -> ProvisionResult<Self> {
        if phase.is_terminal() {
            return Err(ProvisionError::new(ProvisionErrorKind::InvalidTransition {
                from: "new".to_string(),
                to: phase.to_string(),
            }));
        }
        let now = Utc::now();
        Ok(Self {
            id: StatusId::generate(),
            guild_id,
            config_id,
            phase,
            progress: 0,
            message: message.into(),
            started_at: now,
            updated_at: now,
            completed_at: None,
        })
    }

    /// Move the run to `phase` with the given progress and message.
    ///
    /// Entering a terminal phase stamps `completed_at`. A rejected update
    /// leaves the record unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed, progress exceeds
    /// 100, or progress would decrease while running.
    #[track_caller]
    pub fn apply(
        &mut self,
        phase: SetupPhase,
        progress: u8,
        message: impl Into<String>,
    ) -> ProvisionResult<()> {
        if progress > 100 {
            return Err(ProvisionError::new(ProvisionErrorKind::ProgressOutOfRange(
                progress,
            )));
        }
        if !self.phase.can_transition_to(phase) {
            return Err(ProvisionError::new(ProvisionErrorKind::InvalidTransition {
                from: self.phase.to_string(),
                to: phase.to_string(),
            }));
        }
        if self.phase == SetupPhase::Running
            && phase == SetupPhase::Running
            && progress < self.progress
        {
            return Err(ProvisionError::new(ProvisionErrorKind::ProgressRegressed {
                from: self.progress,
                to: progress,
            }));
        }

        let now = Utc::now();
        self.phase = phase;
        self.progress = progress;
        self.message = message.into();
        self.updated_at = now;
        if phase.is_terminal() && self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> SetupStatus {
        SetupStatus::new(GuildId(1), "cfg".into(), SetupPhase::Running, "start").unwrap()
    }

    #[test]
    fn test_cannot_start_terminal() {
        assert!(
            SetupStatus::new(GuildId(1), "cfg".into(), SetupPhase::Completed, "x").is_err()
        );
    }

    #[test]
    fn test_happy_path_stamps_completion() {
        let mut status = running();
        status.apply(SetupPhase::Running, 10, "Creating roles").unwrap();
        status.apply(SetupPhase::Running, 50, "Creating channels").unwrap();
        assert!(status.completed_at().is_none());
        status.apply(SetupPhase::Completed, 100, "done").unwrap();
        assert_eq!(status.phase(), SetupPhase::Completed);
        assert!(status.completed_at().is_some());
    }

    #[test]
    fn test_terminal_is_immutable() {
        let mut status = running();
        status.apply(SetupPhase::Failed, 0, "boom").unwrap();
        let before = status.clone();
        assert!(status.apply(SetupPhase::Running, 10, "again").is_err());
        assert!(status.apply(SetupPhase::Failed, 0, "again").is_err());
        assert_eq!(status, before);
    }

    #[test]
    fn test_progress_rules() {
        let mut status = running();
        status.apply(SetupPhase::Running, 50, "half").unwrap();
        let err = status.apply(SetupPhase::Running, 10, "back").unwrap_err();
        assert!(matches!(
            err.kind(),
            ProvisionErrorKind::ProgressRegressed { from: 50, to: 10 }
        ));
        assert!(status.apply(SetupPhase::Running, 101, "over").is_err());
        assert_eq!(status.progress(), 50);
        // failure resets progress to zero
        status.apply(SetupPhase::Failed, 0, "err").unwrap();
    }

    #[test]
    fn test_wire_names() {
        let status = running();
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["status"], "running");
        assert_eq!(json["guild_id"], "1");
        assert!(json["completed_at"].is_null());
    }
}
