//! Per-client correlation identifier.

use std::fmt;
use uuid::Uuid;

/// Identity of a single client instance.
///
/// Generated once when the client is built and sent as the `uuid` query
/// parameter on every publish and subscribe request, so the service can
/// correlate requests coming from the same client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientIdentity(Uuid);

impl ClientIdentity {
    /// Generate a new random identity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Raw 128-bit value.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl fmt::Display for ClientIdentity {
    /// Lowercase `8-4-4-4-12` hex.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
