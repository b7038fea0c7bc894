//! Live round trips against the public `demo` keyset.
//!
//! # Running
//!
//! ```bash
//! cd link && cargo test --features e2e-tests --test test_live -- --nocapture
//! ```

#![cfg(feature = "e2e-tests")]

use pubnub_link::{PubNubClient, PubNubTimeouts};
use serde_json::json;
use std::time::Duration;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

fn demo_client() -> PubNubClient {
    PubNubClient::builder()
        .publish_key("demo")
        .subscribe_key("demo")
        .ssl(true)
        .timeouts(PubNubTimeouts::fast())
        .build()
        .expect("demo client should build")
}

fn unique_channel(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}

#[tokio::test]
async fn test_live_time() {
    let time = demo_client().time().await.expect("time should succeed");
    assert!(time.len() >= 17, "unexpected time token {}", time);
    assert!(time.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_live_publish() {
    let timestamp = demo_client()
        .publish(&unique_channel("publish"), "Hello, World")
        .await
        .expect("publish should succeed");
    assert!(!timestamp.is_empty());
}

#[tokio::test]
async fn test_live_publish_then_subscribe() {
    let client = demo_client();
    let channel = unique_channel("roundtrip");
    let start = client.time().await.expect("time should succeed");

    let mut sub = client
        .subscribe_from(&channel, start.into(), CancellationToken::new())
        .expect("subscribe should start");

    let payload = json!({"text": "hello from pubnub-link", "n": 1});
    client.publish(&channel, &payload).await.expect("publish should succeed");

    let message = timeout(Duration::from_secs(30), sub.next())
        .await
        .expect("message should arrive within 30s")
        .expect("stream should stay open");
    assert_eq!(message.channel, channel);
    assert_eq!(message.payload, payload);

    let end = sub.close().await;
    assert!(end.is_cancelled());
    assert!(!end.last_token().is_initial());
}
