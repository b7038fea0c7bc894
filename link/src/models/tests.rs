use serde_json::json;
use std::time::Duration;

use super::*;
use crate::error::PubNubError;

fn array(value: serde_json::Value) -> Vec<serde_json::Value> {
    match value {
        serde_json::Value::Array(items) => items,
        other => panic!("expected array, got {}", other),
    }
}

// ==================== ConnectionOptions Tests ====================

#[test]
fn test_connection_options_default() {
    let opts = ConnectionOptions::default();

    assert!(opts.auto_reconnect, "auto_reconnect should default to true");
    assert_eq!(opts.reconnect_delay_ms, 1000, "reconnect_delay_ms should default to 1000");
    assert_eq!(
        opts.max_reconnect_delay_ms, 30000,
        "max_reconnect_delay_ms should default to 30000"
    );
    assert!(
        opts.max_reconnect_attempts.is_none(),
        "max_reconnect_attempts should default to None (infinite)"
    );
    assert_eq!(opts.http_version, HttpVersion::Http1);
}

#[test]
fn test_connection_options_builder_pattern() {
    let opts = ConnectionOptions::new()
        .with_http_version(HttpVersion::Http2)
        .with_auto_reconnect(false)
        .with_reconnect_delay_ms(2000)
        .with_max_reconnect_delay_ms(60000)
        .with_max_reconnect_attempts(Some(5));

    assert_eq!(opts.http_version, HttpVersion::Http2);
    assert!(!opts.auto_reconnect);
    assert_eq!(opts.reconnect_delay_ms, 2000);
    assert_eq!(opts.max_reconnect_delay_ms, 60000);
    assert_eq!(opts.max_reconnect_attempts, Some(5));
}

#[test]
fn test_connection_options_should_retry() {
    let unlimited = ConnectionOptions::new();
    assert!(unlimited.should_retry(0));
    assert!(unlimited.should_retry(10_000));

    let limited = ConnectionOptions::new().with_max_reconnect_attempts(Some(2));
    assert!(limited.should_retry(0));
    assert!(limited.should_retry(1));
    assert!(!limited.should_retry(2));

    // Some(0) disables retries entirely
    let none = ConnectionOptions::new().with_max_reconnect_attempts(Some(0));
    assert!(!none.should_retry(0));

    let disabled = ConnectionOptions::new().with_auto_reconnect(false);
    assert!(!disabled.should_retry(0));
}

#[test]
fn test_connection_options_backoff_is_capped() {
    let opts = ConnectionOptions::new()
        .with_reconnect_delay_ms(100)
        .with_max_reconnect_delay_ms(1000);

    assert_eq!(opts.backoff_delay(0), Duration::from_millis(100));
    assert_eq!(opts.backoff_delay(1), Duration::from_millis(200));
    assert_eq!(opts.backoff_delay(3), Duration::from_millis(800));
    assert_eq!(opts.backoff_delay(4), Duration::from_millis(1000));
    // Large attempt counts must saturate rather than overflow
    assert_eq!(opts.backoff_delay(200), Duration::from_millis(1000));
}

#[test]
fn test_connection_options_serialization() {
    let opts = ConnectionOptions::new()
        .with_reconnect_delay_ms(500)
        .with_max_reconnect_attempts(Some(3));

    let json = serde_json::to_string(&opts).unwrap();
    let parsed: ConnectionOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, opts);

    // Missing fields fall back to defaults
    let partial: ConnectionOptions = serde_json::from_str(r#"{"http_version":"http2"}"#).unwrap();
    assert_eq!(partial.http_version, HttpVersion::Http2);
    assert!(partial.auto_reconnect);
    assert_eq!(partial.reconnect_delay_ms, 1000);
}

// ==================== ClientConfig Tests ====================

#[test]
fn test_client_config_origin_url_scheme() {
    let insecure = ClientConfig::new("pub", "sub");
    assert_eq!(insecure.origin_url(), "http://pubsub.pubnub.com");

    let secure = ClientConfig::new("pub", "sub").with_ssl(true);
    assert_eq!(secure.origin_url(), "https://pubsub.pubnub.com");
}

#[test]
fn test_client_config_custom_origin() {
    let config = ClientConfig::new("pub", "sub").with_origin("ps.pndsn.com/");
    assert_eq!(config.origin_url(), "http://ps.pndsn.com");

    let stub = ClientConfig::new("pub", "sub").with_origin("http://127.0.0.1:9000/");
    assert_eq!(stub.origin_url(), "http://127.0.0.1:9000");
}

#[test]
fn test_client_config_deserialize_defaults() {
    let config: ClientConfig =
        serde_json::from_value(json!({"publish_key": "p", "subscribe_key": "s"})).unwrap();

    assert_eq!(config.origin, DEFAULT_ORIGIN);
    assert!(!config.ssl);
    assert!(config.secret_key.is_none());
    assert!(config.cipher_key.is_none());
}

// ==================== TimeToken Tests ====================

#[test]
fn test_time_token_initial() {
    let token = TimeToken::initial();
    assert!(token.is_initial());
    assert_eq!(token.as_str(), "0");
    assert_eq!(TimeToken::default(), token);
    assert!(!TimeToken::new("14578841000000000").is_initial());
}

#[test]
fn test_time_token_serde_transparent() {
    let token = TimeToken::new("13904536450617580");
    assert_eq!(serde_json::to_value(&token).unwrap(), json!("13904536450617580"));
}

// ==================== TimeResult Tests ====================

#[test]
fn test_time_result_integer() {
    let result = TimeResult::try_from(array(json!([14578841000000000u64]))).unwrap();
    assert_eq!(result.timestamp, "14578841000000000");
}

#[test]
fn test_time_result_float_is_rendered_without_fraction() {
    let result = TimeResult::try_from(array(json!([1.3904536450617581e16]))).unwrap();
    assert!(!result.timestamp.contains('.'));
    assert!(!result.timestamp.contains('e'));
    assert_eq!(result.timestamp.len(), 17);
}

#[test]
fn test_time_result_rejects_non_numeric() {
    let err = TimeResult::try_from(array(json!(["soon"]))).unwrap_err();
    assert!(matches!(err, PubNubError::ProtocolError(_)));

    let err = TimeResult::try_from(Vec::new()).unwrap_err();
    assert!(matches!(err, PubNubError::ProtocolError(_)));
}

// ==================== PublishResult Tests ====================

#[test]
fn test_publish_result_success() {
    let result = PublishResult::try_from(array(json!([1, "Sent", "14578841"]))).unwrap();
    assert!(result.is_success());
    assert_eq!(result.into_timestamp().unwrap(), "14578841");
}

#[test]
fn test_publish_result_rejection_carries_reason() {
    let result = PublishResult::try_from(array(json!([0, "Invalid Key", "0"]))).unwrap();
    assert!(!result.is_success());

    let err = result.into_timestamp().unwrap_err();
    assert_eq!(err, PubNubError::PublishRejected("Invalid Key".to_string()));
    assert_eq!(err.rejection_reason(), Some("Invalid Key"));
}

#[test]
fn test_publish_result_rejection_without_timestamp() {
    let result = PublishResult::try_from(array(json!([0, "Message Too Large"]))).unwrap();
    assert_eq!(
        result.into_timestamp().unwrap_err(),
        PubNubError::PublishRejected("Message Too Large".to_string())
    );
}

#[test]
fn test_publish_result_float_status() {
    let result = PublishResult::try_from(array(json!([1.0, "Sent", "5"]))).unwrap();
    assert_eq!(result.into_timestamp().unwrap(), "5");

    let result = PublishResult::try_from(array(json!([1.7, "Weird", "5"]))).unwrap();
    assert!(!result.is_success());
    assert_eq!(
        result.into_timestamp().unwrap_err(),
        PubNubError::PublishRejected("Weird".to_string())
    );
}

#[test]
fn test_publish_result_numeric_timestamp() {
    let result = PublishResult::try_from(array(json!([1, "Sent", 14578841000000000u64]))).unwrap();
    assert_eq!(result.timestamp, "14578841000000000");
}

#[test]
fn test_publish_result_shape_errors() {
    for bad in [json!([]), json!(["1", "Sent", "1"]), json!([1]), json!([1, "Sent"])] {
        let err = PublishResult::try_from(array(bad.clone())).unwrap_err();
        assert!(
            matches!(err, PubNubError::ProtocolError(_)),
            "expected protocol error for {}",
            bad
        );
    }
}

// ==================== SubscribeResult Tests ====================

#[test]
fn test_subscribe_result_with_messages() {
    let result =
        SubscribeResult::try_from(array(json!([["hello", {"n": 1}], "13904536450617580"])))
            .unwrap();

    assert!(!result.is_timeout());
    assert_eq!(result.messages, vec![json!("hello"), json!({"n": 1})]);
    assert_eq!(result.time_token, TimeToken::new("13904536450617580"));
}

#[test]
fn test_subscribe_result_timeout_still_advances_token() {
    let result = SubscribeResult::try_from(array(json!([[], "13904536450617581"]))).unwrap();
    assert!(result.is_timeout());
    assert_eq!(result.time_token.as_str(), "13904536450617581");
}

#[test]
fn test_subscribe_result_ignores_trailing_elements() {
    let result = SubscribeResult::try_from(array(json!([["m"], "42", "chat"]))).unwrap();
    assert_eq!(result.messages.len(), 1);
    assert_eq!(result.time_token.as_str(), "42");
}

#[test]
fn test_subscribe_result_missing_token() {
    let err = SubscribeResult::try_from(array(json!([["m"]]))).unwrap_err();
    assert!(matches!(err, PubNubError::ProtocolError(_)));

    let err = SubscribeResult::try_from(array(json!([{"m": 1}, "42"]))).unwrap_err();
    assert!(matches!(err, PubNubError::ProtocolError(_)));
}

// ==================== Message Tests ====================

#[test]
fn test_message_deserialize_payload() {
    #[derive(serde::Deserialize, Debug, PartialEq)]
    struct Chat {
        user: String,
        text: String,
    }

    let msg = Message::new("chat", json!({"user": "ada", "text": "hi"}));
    let chat: Chat = msg.deserialize().unwrap();
    assert_eq!(
        chat,
        Chat {
            user: "ada".to_string(),
            text: "hi".to_string()
        }
    );
    assert!(msg.as_str().is_none());
    assert_eq!(Message::new("chat", json!("Hello, World")).as_str(), Some("Hello, World"));
}
