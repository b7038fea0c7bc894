//! `Subscription` – consumer handle for a single channel subscription.

use futures_util::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{
    error::{PubNubError, Result},
    models::{Message, TimeToken},
};

/// How a subscription loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionEnd {
    /// Stopped by cancellation, or because the consumer went away.
    Cancelled { last_token: TimeToken },
    /// Stopped by an error that was not (or no longer) retried.
    Failed {
        error: PubNubError,
        last_token: TimeToken,
    },
}

impl SubscriptionEnd {
    /// Last token adopted by the loop. Passing it to
    /// [`PubNubClient::subscribe_from`](crate::PubNubClient::subscribe_from)
    /// resumes without re-delivering anything already handed over.
    pub fn last_token(&self) -> &TimeToken {
        match self {
            SubscriptionEnd::Cancelled { last_token } => last_token,
            SubscriptionEnd::Failed { last_token, .. } => last_token,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SubscriptionEnd::Cancelled { .. })
    }

    /// `Ok(last_token)` when cancelled, the error otherwise.
    pub fn into_result(self) -> Result<TimeToken> {
        match self {
            SubscriptionEnd::Cancelled { last_token } => Ok(last_token),
            SubscriptionEnd::Failed { error, .. } => Err(error),
        }
    }
}

/// Receiving end of a channel subscription.
///
/// Messages arrive in the order the service sent them. The background loop
/// does not issue the next long-poll until the previous message has been
/// taken, so a slow consumer slows polling rather than growing a buffer.
///
/// # Examples
///
/// ```rust,no_run
/// use pubnub_link::PubNubClient;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PubNubClient::builder()
///     .publish_key("demo")
///     .subscribe_key("demo")
///     .build()?;
///
/// let mut subscription = client.subscribe("hello_world", CancellationToken::new())?;
///
/// while let Some(message) = subscription.next().await {
///     println!("{}: {}", message.channel, message.payload);
/// }
///
/// let end = subscription.finish().await;
/// println!("resume from {}", end.last_token());
/// # Ok(())
/// # }
/// ```
pub struct Subscription {
    channel: String,
    rx: mpsc::Receiver<Message>,
    /// Child of the caller's token; cancelling it stops only this loop.
    cancel: CancellationToken,
    task: Option<JoinHandle<SubscriptionEnd>>,
    /// Token the loop started from, reported if the task itself fails.
    start_token: TimeToken,
    closed: bool,
}

impl Subscription {
    pub(crate) fn new(
        channel: String,
        rx: mpsc::Receiver<Message>,
        cancel: CancellationToken,
        task: JoinHandle<SubscriptionEnd>,
        start_token: TimeToken,
    ) -> Self {
        Self {
            channel,
            rx,
            cancel,
            task: Some(task),
            start_token,
            closed: false,
        }
    }

    /// Receive the next message.
    ///
    /// Returns `None` once the loop has stopped; [`Subscription::finish`]
    /// then tells why.
    pub async fn next(&mut self) -> Option<Message> {
        if self.closed {
            return None;
        }
        let message = self.rx.recv().await;
        if message.is_none() {
            self.closed = true;
        }
        message
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Returns `true` once the message stream has ended.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Ask the loop to stop. A long-poll already in flight is allowed to
    /// finish; its result is discarded.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the loop to stop and return how it ended.
    ///
    /// Messages not yet received are discarded. Call this after
    /// [`Subscription::next`] has returned `None`, or after
    /// [`Subscription::cancel`], to get the end reason without losing data.
    pub async fn finish(mut self) -> SubscriptionEnd {
        self.closed = true;
        self.rx.close();

        let Some(task) = self.task.take() else {
            return SubscriptionEnd::Cancelled {
                last_token: self.start_token.clone(),
            };
        };

        match task.await {
            Ok(end) => end,
            Err(e) => SubscriptionEnd::Failed {
                error: PubNubError::InternalError(format!("subscription task failed: {}", e)),
                last_token: self.start_token.clone(),
            },
        }
    }

    /// Cancel the loop and wait for it to stop.
    pub async fn close(self) -> SubscriptionEnd {
        self.cancel();
        self.finish().await
    }
}

impl Stream for Subscription {
    type Item = Message;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.closed {
            return Poll::Ready(None);
        }
        let polled = self.rx.poll_recv(cx);
        if let Poll::Ready(None) = polled {
            self.closed = true;
        }
        polled
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &self.channel)
            .field("closed", &self.closed)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
