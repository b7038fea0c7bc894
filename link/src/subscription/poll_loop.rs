//! Background long-poll task for a single channel subscription.
//!
//! The loop owns the continuation token and the sending half of the delivery
//! channel. Each iteration waits for the consumer to take the previous message,
//! issues one subscribe request, adopts the returned token, and hands the
//! batch over one message at a time.

use log::{debug, trace, warn};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    error::Result,
    event_handlers::{ConnectionError, DisconnectReason, EventHandlers},
    identity::ClientIdentity,
    models::{ConnectionOptions, Message, SubscribeResult, TimeToken},
    request::{RequestExecutor, RequestPath},
};

use super::SubscriptionEnd;

/// Path for one subscribe long-poll.
pub(crate) fn subscribe_path(
    subscribe_key: &str,
    channel: &str,
    token: &TimeToken,
    identity: &ClientIdentity,
) -> RequestPath {
    RequestPath::new(["subscribe", subscribe_key, channel, "0", token.as_str()])
        .encoded()
        .query_param("uuid", identity.to_string())
}

/// State of one subscription loop. Consumed by [`PollLoop::run`].
pub(crate) struct PollLoop {
    pub(crate) executor: RequestExecutor,
    pub(crate) subscribe_key: String,
    pub(crate) channel: String,
    pub(crate) identity: ClientIdentity,
    pub(crate) token: TimeToken,
    pub(crate) long_poll_timeout: Duration,
    pub(crate) options: ConnectionOptions,
    pub(crate) handlers: EventHandlers,
}

impl PollLoop {
    /// Poll until cancelled, the consumer goes away, or a terminal error.
    ///
    /// `tx` is dropped when this returns, which ends the consumer's stream.
    pub(crate) async fn run(
        mut self,
        tx: mpsc::Sender<Message>,
        cancel: CancellationToken,
    ) -> SubscriptionEnd {
        debug!(
            "[PUBNUB_SUB] Starting poll loop: channel={} token={}",
            self.channel, self.token
        );

        let mut failures: u32 = 0;
        let mut connected = false;

        let end = loop {
            // The slot frees up only once the consumer has taken the last
            // message handed over, so this gates the next poll on consumption.
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break self.cancelled(),
                permit = tx.reserve() => match permit {
                    Ok(permit) => drop(permit),
                    Err(_) => break self.cancelled(),
                },
            }

            let outcome = self.poll_once().await;

            if cancel.is_cancelled() {
                trace!(
                    "[PUBNUB_SUB] Discarding poll result after cancellation: channel={}",
                    self.channel
                );
                break self.cancelled();
            }

            match outcome {
                Ok(batch) => {
                    if !connected || failures > 0 {
                        connected = true;
                        self.handlers.emit_connect(&self.channel);
                    }
                    failures = 0;

                    self.token = batch.time_token;

                    if batch.messages.is_empty() {
                        trace!(
                            "[PUBNUB_SUB] Idle timeout: channel={} token={}",
                            self.channel,
                            self.token
                        );
                        continue;
                    }

                    debug!(
                        "[PUBNUB_SUB] Received {} message(s): channel={} token={}",
                        batch.messages.len(),
                        self.channel,
                        self.token
                    );

                    if !self.deliver(&tx, &cancel, batch.messages).await {
                        break self.cancelled();
                    }
                },
                Err(error) => {
                    let recoverable = error.is_retriable() && self.options.should_retry(failures);
                    self.handlers.emit_error(ConnectionError::new(
                        &self.channel,
                        error.to_string(),
                        recoverable,
                    ));

                    if !recoverable {
                        warn!(
                            "[PUBNUB_SUB] Poll loop failed: channel={} error={}",
                            self.channel, error
                        );
                        break SubscriptionEnd::Failed {
                            error,
                            last_token: self.token.clone(),
                        };
                    }

                    let delay = self.options.backoff_delay(failures);
                    failures += 1;
                    warn!(
                        "[PUBNUB_SUB] Poll failed (attempt {}), retrying in {:?}: channel={} error={}",
                        failures, delay, self.channel, error
                    );

                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => break self.cancelled(),
                        _ = tokio::time::sleep(delay) => {},
                    }
                },
            }
        };

        let reason = match &end {
            SubscriptionEnd::Cancelled { .. } => DisconnectReason::cancelled(&self.channel),
            SubscriptionEnd::Failed { error, .. } => {
                DisconnectReason::failed(&self.channel, error.to_string())
            },
        };
        debug!("[PUBNUB_SUB] Poll loop stopped: {}", reason);
        self.handlers.emit_disconnect(reason);

        end
    }

    async fn poll_once(&self) -> Result<SubscribeResult> {
        let path = subscribe_path(&self.subscribe_key, &self.channel, &self.token, &self.identity);
        let body = self.executor.execute(&path, self.long_poll_timeout).await?;
        SubscribeResult::try_from(body)
    }

    /// Hand messages over in order. Returns `false` if cancelled or the
    /// consumer dropped its end.
    async fn deliver(
        &self,
        tx: &mpsc::Sender<Message>,
        cancel: &CancellationToken,
        payloads: Vec<serde_json::Value>,
    ) -> bool {
        for payload in payloads {
            let permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => return false,
                permit = tx.reserve() => match permit {
                    Ok(permit) => permit,
                    Err(_) => return false,
                },
            };
            permit.send(Message::new(self.channel.clone(), payload));
        }
        true
    }

    fn cancelled(&self) -> SubscriptionEnd {
        SubscriptionEnd::Cancelled {
            last_token: self.token.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_path_layout() {
        let identity = ClientIdentity::generate();
        let path = subscribe_path("sub-c-1", "room 1/a", &TimeToken::new("42"), &identity);

        assert!(path.is_encoded());
        assert_eq!(path.segments(), ["subscribe", "sub-c-1", "room 1/a", "0", "42"]);
        assert_eq!(path.query(), [("uuid".to_string(), identity.to_string())]);
    }
}
