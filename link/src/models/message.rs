use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A message delivered by a subscription.
///
/// The payload is whatever JSON the publisher sent; no schema is imposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Channel the message was received on
    pub channel: String,

    /// Published JSON value
    pub payload: JsonValue,
}

impl Message {
    pub fn new(channel: impl Into<String>, payload: JsonValue) -> Self {
        Self {
            channel: channel.into(),
            payload,
        }
    }

    /// Deserialize the payload into a concrete type.
    pub fn deserialize<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        T::deserialize(&self.payload)
    }

    /// The payload as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        self.payload.as_str()
    }

    pub fn into_payload(self) -> JsonValue {
        self.payload
    }
}
