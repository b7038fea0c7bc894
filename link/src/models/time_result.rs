use serde_json::Value as JsonValue;

use super::utils::render_integer;
use crate::error::PubNubError;

/// Response of the `time` endpoint: `[timestamp]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeResult {
    /// Server time rendered as a decimal integer string
    pub timestamp: String,
}

impl TryFrom<Vec<JsonValue>> for TimeResult {
    type Error = PubNubError;

    fn try_from(response: Vec<JsonValue>) -> Result<Self, Self::Error> {
        let first = response.first().ok_or_else(|| {
            PubNubError::ProtocolError("time response is an empty array".to_string())
        })?;

        let timestamp = render_integer(first).ok_or_else(|| {
            PubNubError::ProtocolError(format!("time response is not numeric: {}", first))
        })?;

        Ok(Self { timestamp })
    }
}
