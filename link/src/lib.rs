//! # pubnub-link: PubNub REST client
//!
//! An async client for the PubNub publish/subscribe service over its plain
//! HTTP long-poll API (REST v3.3).
//!
//! ## Features
//!
//! - **Publish**: send any `Serialize` value to a channel and get the
//!   acknowledgement timestamp back
//! - **Subscribe**: a background long-poll loop per channel with ordered,
//!   backpressured delivery and resumable time tokens
//! - **Reconnect**: transient network failures are retried with exponential
//!   backoff
//! - **Time**: read the server clock
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pubnub_link::PubNubClient;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PubNubClient::builder()
//!         .publish_key("demo")
//!         .subscribe_key("demo")
//!         .build()?;
//!
//!     println!("server time: {}", client.time().await?);
//!
//!     let cancel = CancellationToken::new();
//!     let mut subscription = client.subscribe("hello_world", cancel.clone())?;
//!
//!     client.publish("hello_world", &serde_json::json!({"text": "hi"})).await?;
//!
//!     if let Some(message) = subscription.next().await {
//!         println!("{}: {}", message.channel, message.payload);
//!     }
//!
//!     cancel.cancel();
//!     let end = subscription.finish().await;
//!     println!("resume from {}", end.last_token());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod event_handlers;
pub mod identity;
pub mod models;
pub mod request;
pub mod subscription;
pub mod timeouts;
pub mod transport;

// Re-export main types for convenience
pub use client::{PubNubClient, PubNubClientBuilder};
pub use error::{PubNubError, Result};
pub use event_handlers::{ConnectionError, DisconnectReason, EventHandlers};
pub use identity::ClientIdentity;
pub use models::{
    ClientConfig, ConnectionOptions, HttpVersion, Message, PublishResult, SubscribeResult,
    TimeResult, TimeToken,
};
pub use request::{RequestExecutor, RequestPath};
pub use subscription::{Subscription, SubscriptionEnd};
pub use timeouts::{PubNubTimeouts, PubNubTimeoutsBuilder};
pub use transport::{HttpTransport, ReqwestTransport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
