//! Error types for pubnub-link.
//!
//! Every public operation returns [`Result`], so callers match on a single
//! [`PubNubError`] taxonomy regardless of which endpoint failed.

use thiserror::Error;

/// Result type for pubnub-link operations
pub type Result<T> = std::result::Result<T, PubNubError>;

/// Errors that can occur while talking to the PubNub REST API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PubNubError {
    /// Malformed caller input (empty path, empty channel, missing key)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The network call could not complete (connect refused, TLS, reset, 5xx)
    #[error("Transport error: {0}")]
    TransportError(String),

    /// A client-side deadline expired before the server answered
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// The response body is not a well-formed JSON array
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// The message could not be serialized to JSON
    #[error("Encode error: {0}")]
    EncodeError(String),

    /// Well-formed JSON that does not have the expected shape
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// The server explicitly declined a publish; carries the server's reason
    #[error("Publish rejected: {0}")]
    PublishRejected(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Unexpected internal failure (e.g. a background task panicked)
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl PubNubError {
    /// Whether a subscription may retry after this error without losing its
    /// position in the stream.
    ///
    /// Only network-level failures qualify. Decode and protocol errors mean the
    /// server and client disagree about the wire format, so retrying would
    /// just fail again.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::TransportError(_) | Self::TimeoutError(_))
    }

    /// Server-supplied reason text for a rejected publish.
    pub fn rejection_reason(&self) -> Option<&str> {
        match self {
            Self::PublishRejected(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PubNubError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PubNubError::TimeoutError(err.to_string())
        } else {
            PubNubError::TransportError(err.to_string())
        }
    }
}

impl From<url::ParseError> for PubNubError {
    fn from(err: url::ParseError) -> Self {
        PubNubError::InvalidRequest(format!("Invalid URL: {}", err))
    }
}
