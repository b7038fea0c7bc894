//! Subcommand handlers.

pub mod publish;
pub mod subscribe;
pub mod time;

use pubnub_cli::{CLIConfiguration, Result};
use pubnub_link::{ConnectionError, DisconnectReason, EventHandlers, PubNubClient};

use crate::args::Cli;

/// Build a client from the config file overlaid with flags and environment.
pub fn create_client(cli: &Cli) -> Result<PubNubClient> {
    let config = CLIConfiguration::load(&cli.config)?;
    let client_config = config.to_client_config(&cli.key_overrides())?;

    let mut options = config.to_connection_options();
    if cli.no_reconnect {
        options = options.with_auto_reconnect(false);
    }

    let handlers = EventHandlers::new()
        .on_connect(|channel| tracing::info!("Listening on {}", channel))
        .on_error(|err: ConnectionError| {
            if err.recoverable {
                tracing::warn!("Poll on {} failed, retrying: {}", err.channel, err.message);
            }
        })
        .on_disconnect(|reason: DisconnectReason| tracing::debug!("Stopped: {}", reason));

    let client = PubNubClient::builder()
        .config(client_config)
        .timeouts(config.to_timeouts())
        .connection_options(options)
        .event_handlers(handlers)
        .build()?;
    Ok(client)
}
