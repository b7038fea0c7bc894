//! Data models for pubnub-link client library.
//!
//! Client configuration, connection options and the typed results each
//! endpoint's positional JSON array is validated into.

pub mod client_config;
pub mod connection_options;
pub mod http_version;
pub mod message;
pub mod publish_result;
pub mod subscribe_result;
pub mod time_result;
pub mod time_token;
pub mod utils;

#[cfg(test)]
mod tests;

pub use client_config::{ClientConfig, DEFAULT_ORIGIN};
pub use connection_options::ConnectionOptions;
pub use http_version::HttpVersion;
pub use message::Message;
pub use publish_result::{PublishResult, PUBLISH_SUCCESS};
pub use subscribe_result::SubscribeResult;
pub use time_result::TimeResult;
pub use time_token::TimeToken;
pub use utils::{render_integer, string_or_integer};
