use pubnub_cli::{output::render_message, Result};
use pubnub_link::{PubNubClient, TimeToken};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Options for the `subscribe` command.
#[derive(Debug, Clone)]
pub struct SubscribeOptions {
    pub count: Option<usize>,
    pub from: Option<String>,
    pub payload_only: bool,
    pub grace: Duration,
}

/// Print messages until Ctrl-C, `count` messages, or a terminal error.
///
/// On the way out the last time token goes to stderr so a later run can
/// continue with `--from`.
pub async fn handle_subscribe(
    client: &PubNubClient,
    channel: &str,
    options: SubscribeOptions,
) -> Result<()> {
    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let token = options.from.map(TimeToken::from).unwrap_or_default();
    let mut subscription = client.subscribe_from(channel, token, cancel.clone())?;
    let mut received = 0usize;

    loop {
        if options.count.is_some_and(|limit| received >= limit) {
            break;
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            message = subscription.next() => match message {
                Some(message) => {
                    println!("{}", render_message(&message, options.payload_only));
                    received += 1;
                },
                None => break,
            },
        }
    }

    subscription.cancel();
    match tokio::time::timeout(options.grace, subscription.finish()).await {
        Ok(end) => {
            eprintln!("last time token: {}", end.last_token());
            end.into_result()?;
        },
        Err(_) => {
            tracing::info!(
                "Long-poll still in flight after {:?}; exiting without a resume token",
                options.grace
            );
        },
    }

    Ok(())
}
