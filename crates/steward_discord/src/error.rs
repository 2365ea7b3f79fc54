//! Mapping serenity failures onto platform error kinds.

use steward_error::{PlatformError, PlatformErrorKind};

/// Where a serenity failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    /// Discord answered with a non-success status.
    Status(u16),
    /// The request never got an answer.
    Request,
    /// The gateway session dropped.
    Session,
    Other,
}

impl Failure {
    fn of(err: &serenity::Error) -> Self {
        match err {
            serenity::Error::Http(http) => match http.status_code() {
                Some(status) => Self::Status(status.as_u16()),
                None => Self::Request,
            },
            serenity::Error::Gateway(_) => Self::Session,
            _ => Self::Other,
        }
    }
}

/// Classify an HTTP status returned by Discord.
pub(crate) fn kind_for_status(status: u16, guild_id: u64, detail: String) -> PlatformErrorKind {
    match status {
        401 => PlatformErrorKind::Unauthorized,
        403 => PlatformErrorKind::PermissionDenied(detail),
        404 => PlatformErrorKind::GuildNotFound(guild_id),
        429 => PlatformErrorKind::RateLimited,
        _ => PlatformErrorKind::Api(detail),
    }
}

fn classify(failure: Failure, guild_id: u64, detail: String) -> PlatformErrorKind {
    match failure {
        Failure::Status(status) => kind_for_status(status, guild_id, detail),
        Failure::Request => PlatformErrorKind::Transient(detail),
        Failure::Session => PlatformErrorKind::ConnectionLost(detail),
        Failure::Other => PlatformErrorKind::Api(detail),
    }
}

/// Convert a serenity error raised while acting on `guild_id`.
#[track_caller]
pub(crate) fn platform_error(guild_id: u64, err: serenity::Error) -> PlatformError {
    PlatformError::new(classify(Failure::of(&err), guild_id, err.to_string()))
}
