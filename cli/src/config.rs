//! Configuration file management
//!
//! `CLIConfiguration` with TOML parsing for `~/.pubnub/config.toml`.
//!
//! # Configuration Format
//!
//! ```toml
//! [keys]
//! publish_key = "pub-c-..."
//! subscribe_key = "sub-c-..."
//! ssl = true
//! origin = "pubsub.pubnub.com"
//!
//! [connection]
//! http_version = "http1"         # "http1", "http2", "auto"
//! auto_reconnect = true          # Retry failed long-polls
//! reconnect_delay_ms = 1000      # Initial retry delay
//! max_reconnect_delay_ms = 30000 # Maximum retry delay
//! max_reconnect_attempts = 0     # 0 = unlimited
//! request_timeout_secs = 10      # time / publish
//! long_poll_timeout_secs = 320   # subscribe
//! ```

use pubnub_link::{ClientConfig, ConnectionOptions, HttpVersion, PubNubTimeouts};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{CLIError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "~/.pubnub/config.toml";

/// CLI configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CLIConfiguration {
    /// Keyset and origin
    pub keys: Option<KeysConfig>,

    /// Connection/reconnection settings
    pub connection: Option<ConnectionConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeysConfig {
    pub publish_key: Option<String>,
    pub subscribe_key: Option<String>,
    pub secret_key: Option<String>,
    pub cipher_key: Option<String>,
    #[serde(default)]
    pub ssl: bool,
    pub origin: Option<String>,
}

/// Connection settings for reconnection behavior
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    /// HTTP version preference: "http1", "http2", "auto" (default: "http1")
    #[serde(default)]
    pub http_version: HttpVersion,

    /// Retry failed long-polls (default: true)
    #[serde(default = "default_auto_reconnect")]
    pub auto_reconnect: bool,

    /// Initial delay between retries in milliseconds (default: 1000)
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,

    /// Maximum delay between retries in milliseconds (default: 30000)
    #[serde(default = "default_max_reconnect_delay_ms")]
    pub max_reconnect_delay_ms: u64,

    /// Maximum number of consecutive retries (0 = unlimited, default: 0)
    #[serde(default)]
    pub max_reconnect_attempts: u32,

    /// Timeout for time and publish requests in seconds (default: 10)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound for a subscribe long-poll in seconds (default: 320)
    #[serde(default = "default_long_poll_timeout_secs")]
    pub long_poll_timeout_secs: u64,
}

fn default_auto_reconnect() -> bool {
    true
}

fn default_reconnect_delay_ms() -> u64 {
    1000
}

fn default_max_reconnect_delay_ms() -> u64 {
    30000
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_long_poll_timeout_secs() -> u64 {
    320
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            http_version: HttpVersion::default(),
            auto_reconnect: default_auto_reconnect(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
            max_reconnect_delay_ms: default_max_reconnect_delay_ms(),
            max_reconnect_attempts: 0,
            request_timeout_secs: default_request_timeout_secs(),
            long_poll_timeout_secs: default_long_poll_timeout_secs(),
        }
    }
}

pub fn expand_config_path(path: &Path) -> PathBuf {
    let path_str = path.to_str().unwrap_or(DEFAULT_CONFIG_PATH);
    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(rest);
        }
    }
    path.to_path_buf()
}

/// Keys given on the command line or through `PUBNUB_*` variables.
/// Each one that is set wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct KeyOverrides {
    pub publish_key: Option<String>,
    pub subscribe_key: Option<String>,
    pub ssl: bool,
    pub origin: Option<String>,
}

impl CLIConfiguration {
    /// Load configuration from file
    ///
    /// Returns default configuration if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        let expanded_path = expand_config_path(path);
        let path = &expanded_path;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            CLIError::ConfigurationError(format!("Failed to read config file: {}", e))
        })?;

        let config: CLIConfiguration = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn resolved_connection(&self) -> ConnectionConfig {
        self.connection.clone().unwrap_or_default()
    }

    /// Merge file keys with command-line overrides into a [`ClientConfig`].
    pub fn to_client_config(&self, overrides: &KeyOverrides) -> Result<ClientConfig> {
        let keys = self.keys.clone().unwrap_or_default();

        let subscribe_key = overrides
            .subscribe_key
            .clone()
            .or(keys.subscribe_key)
            .ok_or_else(|| {
                CLIError::ConfigurationError(
                    "no subscribe key: pass --subscribe-key, set PUBNUB_SUBSCRIBE_KEY, or add it to [keys]"
                        .into(),
                )
            })?;
        let publish_key = overrides.publish_key.clone().or(keys.publish_key).unwrap_or_default();

        let mut config = ClientConfig::new(publish_key, subscribe_key)
            .with_ssl(overrides.ssl || keys.ssl);
        if let Some(origin) = overrides.origin.clone().or(keys.origin) {
            config = config.with_origin(origin);
        }
        if let Some(secret) = keys.secret_key {
            config = config.with_secret_key(secret);
        }
        if let Some(cipher) = keys.cipher_key {
            config = config.with_cipher_key(cipher);
        }
        Ok(config)
    }

    /// Build ConnectionOptions from CLI configuration
    pub fn to_connection_options(&self) -> ConnectionOptions {
        let conn = self.resolved_connection();

        // Convert 0 to None (unlimited), otherwise Some(n)
        let max_attempts = if conn.max_reconnect_attempts == 0 {
            None
        } else {
            Some(conn.max_reconnect_attempts)
        };

        ConnectionOptions::new()
            .with_http_version(conn.http_version)
            .with_auto_reconnect(conn.auto_reconnect)
            .with_reconnect_delay_ms(conn.reconnect_delay_ms)
            .with_max_reconnect_delay_ms(conn.max_reconnect_delay_ms)
            .with_max_reconnect_attempts(max_attempts)
    }

    pub fn to_timeouts(&self) -> PubNubTimeouts {
        let conn = self.resolved_connection();
        PubNubTimeouts::builder()
            .request_timeout_secs(conn.request_timeout_secs)
            .long_poll_timeout_secs(conn.long_poll_timeout_secs)
            .build()
    }
}
