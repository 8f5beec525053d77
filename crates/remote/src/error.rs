use serde::Serialize;

use paylens_core::ResponseError;

/// All errors that can be returned by a search backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The request never produced a response (connection refused, timeout,
    /// TLS failure, worker task lost).
    #[error("could not reach search endpoint {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    /// The endpoint answered with a non-success HTTP status.
    #[error("search endpoint {endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// The response body was not a well-formed search result.
    #[error("malformed search response: {0}")]
    MalformedResponse(String),
}

impl RemoteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RemoteError::Transport { .. } | RemoteError::Status { .. } => ErrorKind::Transport,
            RemoteError::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }
}

impl From<ResponseError> for RemoteError {
    fn from(err: ResponseError) -> Self {
        RemoteError::MalformedResponse(err.to_string())
    }
}

/// Coarse failure category shown to the operator.
///
/// Both kinds are retryable by submitting again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    MalformedResponse,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Transport => f.write_str("transport"),
            ErrorKind::MalformedResponse => f.write_str("malformed_response"),
        }
    }
}
