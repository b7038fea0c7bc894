//! Subscription lifecycle event handlers.
//!
//! Callbacks fired by the subscription loop:
//!
//! - [`on_connect`](EventHandlers::on_connect): the first long-poll on a channel
//!   succeeded, or a poll succeeded again after failures
//! - [`on_error`](EventHandlers::on_error): a long-poll failed
//! - [`on_disconnect`](EventHandlers::on_disconnect): the loop stopped for good
//!
//! # Example
//!
//! ```rust,no_run
//! use pubnub_link::{EventHandlers, PubNubClient};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let handlers = EventHandlers::new()
//!     .on_connect(|channel| println!("listening on {}", channel))
//!     .on_error(|error| eprintln!("poll failed: {}", error))
//!     .on_disconnect(|reason| println!("stopped: {}", reason));
//!
//! let client = PubNubClient::builder()
//!     .publish_key("demo")
//!     .subscribe_key("demo")
//!     .event_handlers(handlers)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

/// Why a subscription loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectReason {
    /// Channel the loop was polling.
    pub channel: String,
    /// Human-readable description.
    pub message: String,
    /// `true` when stopped by cancellation or consumer drop rather than an error.
    pub cancelled: bool,
}

impl DisconnectReason {
    pub(crate) fn cancelled(channel: &str) -> Self {
        Self {
            channel: channel.to_string(),
            message: "subscription cancelled".to_string(),
            cancelled: true,
        }
    }

    pub(crate) fn failed(channel: &str, message: impl Into<String>) -> Self {
        Self {
            channel: channel.to_string(),
            message: message.into(),
            cancelled: false,
        }
    }
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (channel: {})", self.message, self.channel)
    }
}

/// Error information passed to the `on_error` handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionError {
    /// Channel the failed poll was for.
    pub channel: String,
    /// Human-readable error message.
    pub message: String,
    /// Whether the loop will retry after this error.
    pub recoverable: bool,
}

impl ConnectionError {
    pub fn new(channel: impl Into<String>, message: impl Into<String>, recoverable: bool) -> Self {
        Self {
            channel: channel.into(),
            message: message.into(),
            recoverable,
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Type alias for the on_connect callback. Receives the channel name.
pub type OnConnectCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Type alias for the on_disconnect callback.
pub type OnDisconnectCallback = Arc<dyn Fn(DisconnectReason) + Send + Sync>;

/// Type alias for the on_error callback.
pub type OnErrorCallback = Arc<dyn Fn(ConnectionError) + Send + Sync>;

/// Subscription lifecycle event handlers.
///
/// All handlers are optional. They run on the subscription's task, so they
/// should return quickly; a slow handler delays the next poll.
#[derive(Clone, Default)]
pub struct EventHandlers {
    pub(crate) on_connect: Option<OnConnectCallback>,
    pub(crate) on_disconnect: Option<OnDisconnectCallback>,
    pub(crate) on_error: Option<OnErrorCallback>,
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandlers")
            .field("on_connect", &self.on_connect.is_some())
            .field("on_disconnect", &self.on_disconnect.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

impl EventHandlers {
    /// Create a new empty `EventHandlers` (no callbacks registered).
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked when polling on a channel (re)starts
    /// succeeding.
    ///
    /// # Example
    /// ```rust
    /// use pubnub_link::EventHandlers;
    ///
    /// let handlers = EventHandlers::new()
    ///     .on_connect(|channel| println!("Connected to {}", channel));
    /// ```
    pub fn on_connect(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_connect = Some(Arc::new(f));
        self
    }

    /// Register a callback invoked once when a subscription loop stops.
    pub fn on_disconnect(mut self, f: impl Fn(DisconnectReason) + Send + Sync + 'static) -> Self {
        self.on_disconnect = Some(Arc::new(f));
        self
    }

    /// Register a callback invoked for every failed long-poll.
    ///
    /// [`ConnectionError::recoverable`] tells whether the loop will retry.
    ///
    /// # Example
    /// ```rust
    /// use pubnub_link::EventHandlers;
    ///
    /// let handlers = EventHandlers::new()
    ///     .on_error(|err| eprintln!("Error (recoverable={}): {}", err.recoverable, err));
    /// ```
    pub fn on_error(mut self, f: impl Fn(ConnectionError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(f));
        self
    }

    /// Returns `true` if any handler is registered.
    pub fn has_any(&self) -> bool {
        self.on_connect.is_some() || self.on_disconnect.is_some() || self.on_error.is_some()
    }

    pub(crate) fn emit_connect(&self, channel: &str) {
        if let Some(cb) = &self.on_connect {
            cb(channel);
        }
    }

    pub(crate) fn emit_disconnect(&self, reason: DisconnectReason) {
        if let Some(cb) = &self.on_disconnect {
            cb(reason);
        }
    }

    pub(crate) fn emit_error(&self, error: ConnectionError) {
        if let Some(cb) = &self.on_error {
            cb(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_empty_handlers_are_noops() {
        let handlers = EventHandlers::new();
        assert!(!handlers.has_any());
        handlers.emit_connect("chat");
        handlers.emit_error(ConnectionError::new("chat", "boom", true));
        handlers.emit_disconnect(DisconnectReason::cancelled("chat"));
    }

    #[test]
    fn test_handlers_receive_events() {
        let log = Arc::new(Mutex::new(Vec::<String>::new()));

        let (a, b, c) = (log.clone(), log.clone(), log.clone());
        let handlers = EventHandlers::new()
            .on_connect(move |ch| a.lock().unwrap().push(format!("connect:{}", ch)))
            .on_error(move |e| b.lock().unwrap().push(format!("error:{}:{}", e.message, e.recoverable)))
            .on_disconnect(move |r| c.lock().unwrap().push(format!("disconnect:{}", r.cancelled)));
        assert!(handlers.has_any());

        handlers.emit_connect("chat");
        handlers.emit_error(ConnectionError::new("chat", "reset", true));
        handlers.emit_disconnect(DisconnectReason::failed("chat", "bad body"));

        assert_eq!(
            *log.lock().unwrap(),
            vec!["connect:chat", "error:reset:true", "disconnect:false"]
        );
    }

    #[test]
    fn test_debug_shows_registration_only() {
        let handlers = EventHandlers::new().on_connect(|_| {});
        let rendered = format!("{:?}", handlers);
        assert!(rendered.contains("on_connect: true"));
        assert!(rendered.contains("on_error: false"));
    }

    #[test]
    fn test_disconnect_reason_display() {
        let reason = DisconnectReason::cancelled("lobby");
        assert!(reason.cancelled);
        assert_eq!(reason.to_string(), "subscription cancelled (channel: lobby)");
    }
}
