use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pubnub_cli::config::{KeyOverrides, DEFAULT_CONFIG_PATH};

/// PubNub CLI - publish to and subscribe on PubNub channels
#[derive(Parser, Debug)]
#[command(name = "pubnub-cli")]
#[command(version)]
#[command(about = "Terminal client for PubNub channels", long_about = None)]
pub struct Cli {
    /// Publish key
    #[arg(long = "publish-key", env = "PUBNUB_PUBLISH_KEY", global = true)]
    pub publish_key: Option<String>,

    /// Subscribe key
    #[arg(long = "subscribe-key", env = "PUBNUB_SUBSCRIBE_KEY", global = true)]
    pub subscribe_key: Option<String>,

    /// Use https
    #[arg(long = "ssl", env = "PUBNUB_SSL", global = true)]
    pub ssl: bool,

    /// Origin host (default: pubsub.pubnub.com)
    #[arg(long = "origin", env = "PUBNUB_ORIGIN", global = true)]
    pub origin: Option<String>,

    /// Configuration file path
    #[arg(long = "config", default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Stop a subscription on the first failed poll instead of retrying
    #[arg(long = "no-reconnect", global = true)]
    pub no_reconnect: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the server time token
    Time,

    /// Publish a message (JSON, or plain text sent as a JSON string)
    Publish {
        channel: String,
        message: String,
    },

    /// Print messages from a channel as JSON lines until Ctrl-C
    Subscribe {
        channel: String,

        /// Exit after this many messages
        #[arg(short = 'n', long = "count")]
        count: Option<usize>,

        /// Resume after this time token
        #[arg(long = "from", value_name = "TOKEN")]
        from: Option<String>,

        /// Print only the payload, without the channel
        #[arg(long = "payload-only")]
        payload_only: bool,

        /// Seconds to wait for an in-flight long-poll when stopping
        #[arg(long = "grace-secs", value_name = "SECONDS", default_value_t = 2)]
        grace_secs: u64,
    },
}

impl Cli {
    pub fn key_overrides(&self) -> KeyOverrides {
        KeyOverrides {
            publish_key: self.publish_key.clone(),
            subscribe_key: self.subscribe_key.clone(),
            ssl: self.ssl,
            origin: self.origin.clone(),
        }
    }
}
