//! Error types for pubnub-cli
//!
//! Provides user-friendly error messages for common CLI failures.

use pubnub_link::PubNubError;
use std::fmt;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CLIError>;

/// Errors that can occur in the CLI
#[derive(Debug)]
pub enum CLIError {
    /// Error from pubnub-link library
    LinkError(PubNubError),

    /// Configuration file or missing key
    ConfigurationError(String),

    /// File I/O error
    FileError(String),
}

impl CLIError {
    fn format_link_error(err: &PubNubError) -> String {
        match err {
            PubNubError::TransportError(msg) => {
                format!("Could not reach PubNub: {}", Self::clean_nested_message(msg))
            },
            PubNubError::TimeoutError(msg) => format!("Request timed out: {}", msg),
            PubNubError::PublishRejected(reason) => format!("Publish rejected: {}", reason),
            PubNubError::InvalidRequest(msg) => format!("Invalid request: {}", msg),
            PubNubError::ConfigurationError(msg) => format!("Configuration error: {}", msg),
            PubNubError::EncodeError(msg) => format!("Message is not valid JSON: {}", msg),
            PubNubError::DecodeError(msg) | PubNubError::ProtocolError(msg) => {
                format!("Unexpected response from PubNub: {}", msg)
            },
            PubNubError::InternalError(msg) => msg.clone(),
        }
    }

    /// Strip the repeated prefixes `reqwest` stacks onto connection errors.
    fn clean_nested_message(message: &str) -> String {
        let mut cleaned = message.trim();
        let prefixes = ["error sending request for url", "client error (Connect):"];

        loop {
            let mut stripped = false;
            for prefix in &prefixes {
                if let Some(rest) = cleaned.strip_prefix(prefix) {
                    cleaned = rest.trim_start();
                    stripped = true;
                    break;
                }
            }

            if !stripped {
                break;
            }
        }

        cleaned.to_string()
    }
}

impl fmt::Display for CLIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CLIError::LinkError(e) => write!(f, "{}", Self::format_link_error(e)),
            CLIError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            CLIError::FileError(msg) => write!(f, "File error: {}", msg),
        }
    }
}

impl std::error::Error for CLIError {}

impl From<PubNubError> for CLIError {
    fn from(err: PubNubError) -> Self {
        CLIError::LinkError(err)
    }
}

impl From<std::io::Error> for CLIError {
    fn from(err: std::io::Error) -> Self {
        CLIError::FileError(err.to_string())
    }
}

impl From<toml::de::Error> for CLIError {
    fn from(err: toml::de::Error) -> Self {
        CLIError::ConfigurationError(format!("TOML parse error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CLIError::ConfigurationError("no subscribe key".into());
        assert_eq!(err.to_string(), "Configuration error: no subscribe key");

        let err = CLIError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.to_string(), "File error: gone");
    }

    #[test]
    fn test_link_error_display() {
        let err = CLIError::from(PubNubError::PublishRejected("Invalid Key".into()));
        assert_eq!(err.to_string(), "Publish rejected: Invalid Key");

        let err = CLIError::from(PubNubError::TransportError(
            "error sending request for url client error (Connect): tcp connect error".into(),
        ));
        assert_eq!(err.to_string(), "Could not reach PubNub: tcp connect error");
    }
}
