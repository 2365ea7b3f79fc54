//! Provisioning run error types.

/// Provisioning error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProvisionErrorKind {
    /// Status update would move the run backwards or out of a terminal phase.
    #[display("Invalid status transition: {} -> {}", from, to)]
    InvalidTransition {
        /// Current phase
        from: String,
        /// Requested phase
        to: String,
    },
    /// Progress outside 0..=100.
    #[display("Progress out of range: {}", _0)]
    ProgressOutOfRange(u8),
    /// Progress would decrease while running.
    #[display("Progress cannot decrease from {} to {}", from, to)]
    ProgressRegressed {
        /// Current progress
        from: u8,
        /// Requested progress
        to: u8,
    },
    /// A provisioning phase aborted.
    #[display("{} phase failed: {}", phase, reason)]
    PhaseFailed {
        /// Phase name ("roles" or "channels")
        phase: String,
        /// Underlying error text
        reason: String,
    },
    /// The status record could not be read or written mid-run.
    #[display("Status tracking failed: {}", _0)]
    StatusUnavailable(String),
}

/// Provisioning error with source location tracking.
///
/// # Examples
///
/// ```
/// use steward_error::{ProvisionError, ProvisionErrorKind};
///
/// let err = ProvisionError::new(ProvisionErrorKind::ProgressOutOfRange(101));
/// assert!(format!("{}", err).contains("101"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provision Error: {} at line {} in {}", kind, line, file)]
pub struct ProvisionError {
    kind: ProvisionErrorKind,
    line: u32,
    file: &'static str,
}

impl ProvisionError {
    /// Create a new ProvisionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProvisionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ProvisionErrorKind {
        &self.kind
    }
}

/// Result type for provisioning operations.
pub type ProvisionResult<T> = Result<T, ProvisionError>;
