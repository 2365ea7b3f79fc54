//! Document store error types.

/// Document store error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StorageErrorKind {
    /// Requested document does not exist
    #[display("{} not found: {}", entity, id)]
    NotFound {
        /// Document collection (e.g. "Configuration")
        entity: String,
        /// Identifier that was looked up
        id: String,
    },
    /// A document with the same unique name already exists
    #[display("Name already in use: {}", _0)]
    DuplicateName(String),
    /// Reading or writing the backing file failed
    #[display("I/O error: {}", _0)]
    Io(String),
    /// The backing document could not be encoded or decoded
    #[display("Serialization error: {}", _0)]
    Serialization(String),
}

/// Document store error with source location tracking.
///
/// # Examples
///
/// ```
/// use steward_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::not_found("Configuration", "abc");
/// assert!(matches!(err.kind(), StorageErrorKind::NotFound { .. }));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    kind: StorageErrorKind,
    line: u32,
    file: &'static str,
}

impl StorageError {
    /// Create a new StorageError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a missing document.
    #[track_caller]
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::NotFound {
            entity: entity.into(),
            id: id.into(),
        })
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorageErrorKind {
        &self.kind
    }

    /// Whether this error means the requested document does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, StorageErrorKind::NotFound { .. })
    }
}

/// Result type for document store operations.
pub type StorageResult<T> = Result<T, StorageError>;
