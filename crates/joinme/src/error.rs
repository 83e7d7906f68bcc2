//! Error types for join.me client operations

use transport::TransportError;

/// Errors from client operations.
///
/// Remote failures arrive as [`Error::Transport`] exactly as the transport
/// reported them; nothing is retried or reinterpreted here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("bad input date: {0}")]
    BadInputDate(String),

    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    #[error("invalid URI: {0}")]
    InvalidUri(String),

    #[error("serializing request body: {0}")]
    Serialize(String),

    #[error("invalid token response: {0}")]
    InvalidTokenResponse(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
