use serde::{Deserialize, Serialize};
use std::fmt;

/// Continuation cursor for a channel's message stream.
///
/// Returned by the server on every subscribe response and echoed on the next
/// poll so the stream resumes exactly where it left off. The value is opaque
/// to the client. `"0"` asks the server for messages published from now on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeToken(String);

impl TimeToken {
    /// The token that starts a fresh subscription without replaying history.
    pub fn initial() -> Self {
        Self("0".to_string())
    }

    /// Wrap a token previously returned by the server.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Whether this is the `"0"` starting token.
    pub fn is_initial(&self) -> bool {
        self.0 == "0"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for TimeToken {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for TimeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TimeToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for TimeToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}
