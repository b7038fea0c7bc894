//! Conversion between command-line text and message payloads.

use pubnub_link::Message;
use serde_json::Value;

/// Interpret a command-line message: valid JSON is sent as-is, anything else
/// as a JSON string.
pub fn parse_payload(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// One JSON line per received message.
pub fn render_message(message: &Message, payload_only: bool) -> String {
    if payload_only {
        message.payload.to_string()
    } else {
        serde_json::json!({ "channel": message.channel, "payload": message.payload }).to_string()
    }
}
