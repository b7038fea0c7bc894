//! PubNub CLI - Terminal client for PubNub channels
//!
//! # Usage
//!
//! ```bash
//! # Server time
//! pubnub-cli --subscribe-key demo time
//!
//! # Publish JSON (or plain text, sent as a JSON string)
//! pubnub-cli --publish-key demo --subscribe-key demo publish hello_world '{"text":"hi"}'
//!
//! # Print the next 10 messages, then the resume token
//! pubnub-cli --subscribe-key demo subscribe hello_world --count 10
//! ```

use clap::Parser;
use std::time::Duration;

use pubnub_cli::{logging::init_logging, Result};

mod args;
mod commands;

use args::{Cli, Command};
use commands::publish::handle_publish;
use commands::subscribe::{handle_subscribe, SubscribeOptions};
use commands::time::handle_time;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let client = commands::create_client(&cli)?;

    match cli.command {
        Command::Time => handle_time(&client).await,
        Command::Publish { channel, message } => handle_publish(&client, &channel, &message).await,
        Command::Subscribe {
            channel,
            count,
            from,
            payload_only,
            grace_secs,
        } => {
            let options = SubscribeOptions {
                count,
                from,
                payload_only,
                grace: Duration::from_secs(grace_secs),
            };
            handle_subscribe(&client, &channel, options).await
        },
    }
}
