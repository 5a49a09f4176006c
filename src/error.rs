use thiserror::Error;

/// Errors raised by a [`LookupService`](crate::drive::LookupService)
#[derive(Debug, Error)]
pub enum LookupError {
    /// The service rejected the access token (HTTP 401)
    #[error("access token was rejected by the Drive API")]
    Unauthorized,

    /// Connection, timeout or decode failure
    #[error("Drive API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Any other non-success status
    #[error("unexpected status {status} from the Drive API: {body}")]
    Service { status: u16, body: String },
}

/// Errors returned by [`PathResolver::resolve`](crate::resolver::PathResolver::resolve).
///
/// A rejected credential is not an error here: it is reported as
/// [`MatchResult::Login`](crate::resolver::MatchResult::Login).
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Drive API request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected status {status} from the Drive API: {body}")]
    Service { status: u16, body: String },
}
