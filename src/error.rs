//! Error types for the Trakt client
//!
//! All fallible operations in the crate return [`Error`]. The taxonomy
//! separates caller mistakes (`Argument`, `NotAuthenticated`, `Client`),
//! server-side failures (`Http`), malformed response bodies (`Response`)
//! and device-flow polling timeouts (`Timeout`).

use thiserror::Error;

/// Category of a non-success HTTP status returned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 405
    MethodNotFound,
    /// 409
    Conflict,
    /// 412
    PreconditionFailed,
    /// 422
    UnprocessableEntity,
    /// 429
    RateLimitExceeded,
    /// 500
    ServerError,
    /// 503, 504 and the 520-522 CDN statuses
    ServiceUnavailable,
    /// Any other 4xx/5xx
    Other,
}

impl StatusKind {
    /// Map a numeric status code to its error category.
    pub fn from_status(status: u16) -> StatusKind {
        match status {
            400 => StatusKind::BadRequest,
            401 => StatusKind::Unauthorized,
            403 => StatusKind::Forbidden,
            404 => StatusKind::NotFound,
            405 => StatusKind::MethodNotFound,
            409 => StatusKind::Conflict,
            412 => StatusKind::PreconditionFailed,
            422 => StatusKind::UnprocessableEntity,
            429 => StatusKind::RateLimitExceeded,
            500 => StatusKind::ServerError,
            503 | 504 | 520..=522 => StatusKind::ServiceUnavailable,
            _ => StatusKind::Other,
        }
    }
}

/// HTTP-status error carrying the numeric status and the raw response
/// body so callers can inspect what the server actually sent.
#[derive(Debug, Clone, Error)]
#[error("HTTP {status} ({kind:?}) from {path}")]
pub struct StatusError {
    pub kind: StatusKind,
    pub status: u16,
    /// Request path the error was raised for.
    pub path: String,
    /// Raw JSON body of the error response, if any.
    pub response: Option<serde_json::Value>,
}

impl StatusError {
    pub fn new(status: u16, path: impl Into<String>, response: Option<serde_json::Value>) -> Self {
        StatusError {
            kind: StatusKind::from_status(status),
            status,
            path: path.into(),
            response,
        }
    }
}

/// Raised when the server's JSON does not match the declared shape.
///
/// This is the only boundary where structural parsing failures surface;
/// the tree parser rewraps everything it hits into this type.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("structure mismatch: {0}")]
    Structure(String),

    #[error(transparent)]
    Deserialize(#[from] serde_json::Error),
}

/// Centralized error type for the client.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller passed invalid or missing arguments. Recoverable by
    /// correcting the input; raised before any network call.
    #[error("invalid argument: {0}")]
    Argument(String),

    /// Endpoint requires a logged-in user and no credentials are set.
    #[error("endpoint requires authentication, no user credentials set")]
    NotAuthenticated,

    /// Ambiguous or unroutable call name, or executor misuse.
    #[error("client error: {0}")]
    Client(String),

    /// The response body did not match the declared response shape.
    #[error("malformed API response: {0}")]
    Response(#[from] ResponseError),

    /// Device-flow polling exceeded its allotted time.
    #[error("device authentication polling timed out")]
    Timeout,

    /// Non-success HTTP status from the API.
    #[error(transparent)]
    Http(#[from] StatusError),

    /// Connection-level failure in the underlying transport.
    #[error("transport error: {0}")]
    Transport(String),
}

impl Error {
    pub(crate) fn argument(msg: impl Into<String>) -> Error {
        Error::Argument(msg.into())
    }

    pub(crate) fn client(msg: impl Into<String>) -> Error {
        Error::Client(msg.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::Transport(e.to_string())
    }
}
