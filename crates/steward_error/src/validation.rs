//! Document validation errors.

/// A server configuration document failed validation.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", message, line, file)]
pub struct ValidationError {
    /// What was wrong with the document
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use steward_error::ValidationError;
    ///
    /// let err = ValidationError::new("Duplicate role name: Admin");
    /// assert!(err.message.contains("Admin"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
