use serde_json::Value as JsonValue;

use super::utils::string_or_integer;
use crate::error::PubNubError;

/// Status code the service uses for an accepted publish.
pub const PUBLISH_SUCCESS: i64 = 1;

/// Response of the `publish` endpoint: `[status, text, timestamp]`.
///
/// Parsing only validates shape. A non-success status is still a valid
/// [`PublishResult`]; use [`PublishResult::into_timestamp`] to turn it into
/// [`PubNubError::PublishRejected`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    /// `1` on success, anything else is a rejection
    pub status: i64,

    /// Status text, e.g. `"Sent"` or `"Invalid Key"`
    pub text: String,

    /// Publish timestamp (time token of the stored message)
    pub timestamp: String,
}

impl PublishResult {
    pub fn is_success(&self) -> bool {
        self.status == PUBLISH_SUCCESS
    }

    /// The timestamp on success, the server's reason text otherwise.
    pub fn into_timestamp(self) -> Result<String, PubNubError> {
        if self.is_success() {
            Ok(self.timestamp)
        } else {
            Err(PubNubError::PublishRejected(self.text))
        }
    }
}

/// Integral floats such as `1.0` keep their value. A fractional status is
/// never a success and is recorded as `0`.
fn status_code(value: &JsonValue) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .map(|f| if f.fract() == 0.0 { f as i64 } else { 0 })
    })
}

impl TryFrom<Vec<JsonValue>> for PublishResult {
    type Error = PubNubError;

    fn try_from(response: Vec<JsonValue>) -> Result<Self, Self::Error> {
        let mut items = response.into_iter();

        let status = items
            .next()
            .as_ref()
            .and_then(status_code)
            .ok_or_else(|| {
                PubNubError::ProtocolError("publish response has no numeric status".to_string())
            })?;

        let text = match items.next() {
            Some(JsonValue::String(s)) => s,
            Some(other) => other.to_string(),
            None => {
                return Err(PubNubError::ProtocolError(
                    "publish response has no status text".to_string(),
                ))
            },
        };

        // Rejections may omit or zero the timestamp; only success needs it.
        let timestamp = match items.next() {
            Some(value) => string_or_integer(&value).ok_or_else(|| {
                PubNubError::ProtocolError(format!("publish timestamp is not a string: {}", value))
            })?,
            None if status != PUBLISH_SUCCESS => String::new(),
            None => {
                return Err(PubNubError::ProtocolError(
                    "publish response has no timestamp".to_string(),
                ))
            },
        };

        Ok(Self {
            status,
            text,
            timestamp,
        })
    }
}
