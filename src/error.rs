use std::fmt;

use crate::ApiError;

/// Boxed error produced by a [`Transport`](crate::Transport) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why an attempt was cancelled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CancelReason {
    /// The caller-supplied cancellation token fired.
    Caller,
    /// The configured per-attempt timeout elapsed.
    Timeout,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Caller => f.write_str("cancelled by caller"),
            Self::Timeout => f.write_str("timed out"),
        }
    }
}

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    /// Client could not be configured (no transport, invalid header values, bad env).
    #[error("configuration error: {0}")]
    Config(String),
    /// Non-success HTTP status with the normalized error payload.
    #[error(transparent)]
    Api(Box<ApiError>),
    /// The attempt was cancelled before a response was received.
    #[error("request {0}")]
    Cancelled(CancelReason),
    /// Network or request execution error from the transport.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
    /// Response decoding or shape validation error.
    #[error("decode error: {0}")]
    Decode(String),
    /// A typed request input could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),
}

impl ArenaError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        self.api().map(|err| err.status)
    }

    /// The normalized API error, if this is one.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the request was cancelled, by the caller or by the timeout.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    /// Whether the request was cancelled by the per-attempt timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Cancelled(CancelReason::Timeout))
    }
}

impl From<ApiError> for ArenaError {
    fn from(err: ApiError) -> Self {
        Self::Api(Box::new(err))
    }
}
