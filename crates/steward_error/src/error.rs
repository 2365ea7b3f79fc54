//! Top-level error wrapper types.

use crate::{ConfigError, PlatformError, ProvisionError, StorageError, ValidationError};

/// Every error condition a Steward operation can surface.
///
/// # Examples
///
/// ```
/// use steward_error::{StewardError, StorageError};
///
/// let err: StewardError = StorageError::not_found("SetupStatus", "42").into();
/// assert!(format!("{}", err).contains("Storage Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StewardErrorKind {
    /// Settings error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Configuration document validation error
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Document store error
    #[from(StorageError)]
    Storage(StorageError),
    /// Chat platform error
    #[from(PlatformError)]
    Platform(PlatformError),
    /// Provisioning run error
    #[from(ProvisionError)]
    Provision(ProvisionError),
}

/// Steward error with kind discrimination.
///
/// # Examples
///
/// ```
/// use steward_error::{StewardError, StewardResult, ValidationError};
///
/// fn might_fail() -> StewardResult<()> {
///     Err(ValidationError::new("Configuration name is empty"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Steward Error: {}", _0)]
pub struct StewardError(Box<StewardErrorKind>);

impl StewardError {
    /// Create a new error from a kind.
    pub fn new(kind: StewardErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StewardErrorKind {
        &self.0
    }

    /// Whether this error means a requested document does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), StewardErrorKind::Storage(e) if e.is_not_found())
    }

    /// The underlying condition without wrapper prefixes or source locations.
    ///
    /// Used for text shown to end users, such as status messages.
    ///
    /// ```
    /// use steward_error::{StewardError, StorageError};
    ///
    /// let err: StewardError = StorageError::not_found("Configuration", "abc").into();
    /// assert_eq!(err.reason(), "Configuration not found: abc");
    /// ```
    pub fn reason(&self) -> String {
        match self.kind() {
            StewardErrorKind::Config(e) => e.message.clone(),
            StewardErrorKind::Validation(e) => e.message.clone(),
            StewardErrorKind::Storage(e) => e.kind().to_string(),
            StewardErrorKind::Platform(e) => e.kind().to_string(),
            StewardErrorKind::Provision(e) => e.kind().to_string(),
        }
    }
}

// Generic From implementation for any type that converts to StewardErrorKind
impl<T> From<T> for StewardError
where
    T: Into<StewardErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Steward operations.
pub type StewardResult<T> = std::result::Result<T, StewardError>;
