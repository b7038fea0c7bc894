use serde::{Deserialize, Serialize};

/// Default host for PubNub REST requests.
pub const DEFAULT_ORIGIN: &str = "pubsub.pubnub.com";

/// Keys and transport settings identifying a PubNub client.
///
/// Set once when the client is built and never mutated afterwards. The secret
/// and cipher keys are carried as part of the client's identity but are not
/// used by publish, subscribe or time.
///
/// # Example
///
/// ```rust
/// use pubnub_link::ClientConfig;
///
/// let config = ClientConfig::new("demo", "demo").with_ssl(true);
/// assert_eq!(config.origin_url(), "https://pubsub.pubnub.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Key authorizing publishes
    #[serde(default)]
    pub publish_key: String,

    /// Key authorizing subscribes (also part of every publish path)
    pub subscribe_key: String,

    /// Secret key used for request signing (not used by this client)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    /// Cipher key used for payload encryption (not used by this client)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cipher_key: Option<String>,

    /// Use `https` instead of `http`
    #[serde(default)]
    pub ssl: bool,

    /// Host name requests are sent to
    #[serde(default = "default_origin")]
    pub origin: String,
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

impl ClientConfig {
    pub fn new(publish_key: impl Into<String>, subscribe_key: impl Into<String>) -> Self {
        Self {
            publish_key: publish_key.into(),
            subscribe_key: subscribe_key.into(),
            secret_key: None,
            cipher_key: None,
            ssl: false,
            origin: default_origin(),
        }
    }

    pub fn with_secret_key(mut self, key: impl Into<String>) -> Self {
        self.secret_key = Some(key.into());
        self
    }

    pub fn with_cipher_key(mut self, key: impl Into<String>) -> Self {
        self.cipher_key = Some(key.into());
        self
    }

    pub fn with_ssl(mut self, ssl: bool) -> Self {
        self.ssl = ssl;
        self
    }

    /// Override the origin host, e.g. a dedicated keyset domain.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// `https://<origin>` when `ssl` is set, `http://<origin>` otherwise.
    ///
    /// An origin that already carries a scheme (as used by stub servers in
    /// tests) is returned without its trailing slash.
    pub fn origin_url(&self) -> String {
        let origin = self.origin.trim().trim_end_matches('/');
        if origin.starts_with("http://") || origin.starts_with("https://") {
            return origin.to_string();
        }
        let scheme = if self.ssl { "https" } else { "http" };
        format!("{}://{}", scheme, origin)
    }
}
