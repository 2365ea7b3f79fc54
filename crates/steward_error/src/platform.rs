//! Chat platform error types.
//!
//! Errors raised by a target-server capability. The provisioners use
//! [`PlatformErrorKind::is_fatal`] to tell a single failed create call apart
//! from a failure that makes the rest of the phase pointless.

use derive_getters::Getters;

/// Platform error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum PlatformErrorKind {
    /// Generic API error returned for a single request.
    #[display("Platform API error: {_0}")]
    Api(String),

    /// The platform asked us to slow down.
    #[display("Rate limited by the platform")]
    RateLimited,

    /// A single request failed in transport, such as a timeout or reset.
    #[display("Request failed: {_0}")]
    Transient(String),

    /// Bot lacks the permission required for the request.
    #[display("Insufficient permissions: {_0}")]
    PermissionDenied(String),

    /// An entity with this name conflicts with an existing one.
    #[display("Name conflict: {_0}")]
    NameConflict(String),

    /// Target server does not exist or the bot is not a member.
    #[display("Guild not found: {_0}")]
    GuildNotFound(u64),

    /// Bot token is invalid or expired.
    #[display("Invalid or expired bot token")]
    Unauthorized,

    /// Session with the platform was lost mid-operation.
    #[display("Connection lost: {_0}")]
    ConnectionLost(String),

    /// No connection to the platform has been configured or started.
    #[display("Not connected: {_0}")]
    NotConnected(String),

    /// Connection is already running.
    #[display("Connection already running")]
    AlreadyRunning,
}

impl PlatformErrorKind {
    /// Whether this failure affects every further request against the target.
    ///
    /// Non-fatal errors are scoped to the single request that produced them.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::GuildNotFound(_)
                | Self::Unauthorized
                | Self::ConnectionLost(_)
                | Self::NotConnected(_)
        )
    }
}

/// Platform error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Platform Error: {} at line {} in {}", kind, line, file)]
pub struct PlatformError {
    kind: PlatformErrorKind,
    line: u32,
    file: &'static str,
}

impl PlatformError {
    /// Create a new PlatformError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use steward_error::{PlatformError, PlatformErrorKind};
    ///
    /// let err = PlatformError::new(PlatformErrorKind::Unauthorized);
    /// assert!(err.is_fatal());
    ///
    /// let err = PlatformError::new(PlatformErrorKind::Transient("timed out".into()));
    /// assert!(!err.is_fatal());
    /// ```
    #[track_caller]
    pub fn new(kind: PlatformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether this failure should abort the current phase.
    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;
