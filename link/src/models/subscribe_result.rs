use serde_json::Value as JsonValue;

use super::time_token::TimeToken;
use super::utils::string_or_integer;
use crate::error::PubNubError;

/// Response of the `subscribe` endpoint: `[messages, time_token]`.
///
/// An empty `messages` array is the server releasing an idle long-poll, not an
/// error. The token is always present and must be adopted either way.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscribeResult {
    /// Messages published after the previous token, in publish order
    pub messages: Vec<JsonValue>,

    /// Token to send with the next poll
    pub time_token: TimeToken,
}

impl SubscribeResult {
    /// Whether the server released the poll without data.
    pub fn is_timeout(&self) -> bool {
        self.messages.is_empty()
    }
}

impl TryFrom<Vec<JsonValue>> for SubscribeResult {
    type Error = PubNubError;

    fn try_from(response: Vec<JsonValue>) -> Result<Self, Self::Error> {
        let mut items = response.into_iter();

        let messages = match items.next() {
            Some(JsonValue::Array(messages)) => messages,
            Some(other) => {
                return Err(PubNubError::ProtocolError(format!(
                    "subscribe messages are not an array: {}",
                    other
                )))
            },
            None => {
                return Err(PubNubError::ProtocolError(
                    "subscribe response is an empty array".to_string(),
                ))
            },
        };

        let time_token = items
            .next()
            .as_ref()
            .and_then(string_or_integer)
            .map(TimeToken::new)
            .ok_or_else(|| {
                PubNubError::ProtocolError("subscribe response has no time token".to_string())
            })?;

        Ok(Self {
            messages,
            time_token,
        })
    }
}
