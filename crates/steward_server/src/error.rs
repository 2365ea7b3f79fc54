//! Mapping of Steward errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use steward_error::{
    PlatformError, PlatformErrorKind, StewardError, StewardErrorKind, StorageError,
    StorageErrorKind, ValidationError,
};
use tracing::error;

/// An error response with a `{"detail"}` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    /// Error response with an explicit status.
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// HTTP status of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Text placed in the `detail` field.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

fn status_for(err: &StewardError) -> StatusCode {
    match err.kind() {
        StewardErrorKind::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        StewardErrorKind::Storage(e) => match e.kind() {
            StorageErrorKind::NotFound { .. } => StatusCode::NOT_FOUND,
            StorageErrorKind::DuplicateName(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        },
        StewardErrorKind::Platform(e) => match e.kind() {
            PlatformErrorKind::NotConnected(_) => StatusCode::SERVICE_UNAVAILABLE,
            PlatformErrorKind::GuildNotFound(_) => StatusCode::NOT_FOUND,
            PlatformErrorKind::AlreadyRunning => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        },
        StewardErrorKind::Config(_) | StewardErrorKind::Provision(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<StewardError> for ApiError {
    fn from(err: StewardError) -> Self {
        let status = status_for(&err);
        if status.is_server_error() {
            error!(error = %err, "Request failed");
        }
        Self::new(status, err.reason())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        StewardError::from(err).into()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        StewardError::from(err).into()
    }
}

impl From<PlatformError> for ApiError {
    fn from(err: PlatformError) -> Self {
        StewardError::from(err).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_statuses() {
        let err: ApiError = StorageError::not_found("Configuration", "abc").into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.detail(), "Configuration not found: abc");

        let err: ApiError =
            StorageError::new(StorageErrorKind::DuplicateName("gaming".into())).into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_platform_statuses() {
        let err: ApiError =
            PlatformError::new(PlatformErrorKind::NotConnected("offline".into())).into();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);

        let err: ApiError = PlatformError::new(PlatformErrorKind::GuildNotFound(7)).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_status() {
        let err: ApiError = ValidationError::new("Configuration name is empty").into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.detail(), "Configuration name is empty");
    }
}
