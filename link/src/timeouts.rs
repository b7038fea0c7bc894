//! Timeout configuration for PubNub client operations.
//!
//! Provides centralized timeout management for the two kinds of requests the
//! client issues: short request/response calls (`time`, `publish`) and
//! long-poll subscribe calls that the server deliberately holds open.

use std::time::Duration;

/// How long the service holds an idle subscribe long-poll before answering
/// with an empty batch. Every preset keeps its long-poll bound above this.
pub const SERVER_IDLE_WINDOW: Duration = Duration::from_secs(300);

/// Timeout configuration for PubNub client operations.
///
/// # Examples
///
/// ```rust
/// use pubnub_link::PubNubTimeouts;
/// use std::time::Duration;
///
/// // Use defaults (recommended for most cases)
/// let timeouts = PubNubTimeouts::default();
///
/// // Custom timeouts for high-latency environments
/// let timeouts = PubNubTimeouts::builder()
///     .connection_timeout(Duration::from_secs(30))
///     .request_timeout(Duration::from_secs(30))
///     .build();
///
/// // Aggressive timeouts for local development
/// let timeouts = PubNubTimeouts::fast();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PubNubTimeouts {
    /// Timeout for establishing connections (TCP + TLS handshake).
    /// Default: 10 seconds
    pub connection_timeout: Duration,

    /// Upper bound for `time` and `publish` requests.
    /// Default: 10 seconds
    pub request_timeout: Duration,

    /// Upper bound for a single subscribe long-poll.
    ///
    /// The service releases an idle long-poll after roughly 300 seconds, so this
    /// must stay above that window. Expiry is treated as a retryable failure.
    /// Default: 320 seconds
    pub long_poll_timeout: Duration,
}

impl Default for PubNubTimeouts {
    fn default() -> Self {
        Self {
            connection_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(10),
            long_poll_timeout: Duration::from_secs(320),
        }
    }
}

impl PubNubTimeouts {
    /// Create a new builder for custom timeout configuration.
    pub fn builder() -> PubNubTimeoutsBuilder {
        PubNubTimeoutsBuilder::new()
    }

    /// Shorter connect and request timeouts for local development.
    ///
    /// The long-poll bound stays just above [`SERVER_IDLE_WINDOW`] so idle
    /// polls end with an empty batch rather than a client-side timeout.
    pub fn fast() -> Self {
        Self {
            connection_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
            long_poll_timeout: SERVER_IDLE_WINDOW + Duration::from_secs(10),
        }
    }

    /// Longer timeouts for high-latency or unreliable networks.
    pub fn relaxed() -> Self {
        Self {
            connection_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(60),
            long_poll_timeout: Duration::from_secs(600),
        }
    }

    /// Timeouts for tests that must give up on a long-poll after `long_poll_secs`.
    pub fn for_testing(long_poll_secs: u64) -> Self {
        Self {
            connection_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(5),
            long_poll_timeout: Duration::from_secs(long_poll_secs),
        }
    }

    /// Check if a duration represents "no timeout" (zero or very large).
    pub fn is_no_timeout(duration: Duration) -> bool {
        duration.is_zero() || duration > Duration::from_secs(86400 * 365) // > 1 year
    }
}

/// Builder for creating custom [`PubNubTimeouts`] configurations.
#[derive(Debug, Clone)]
pub struct PubNubTimeoutsBuilder {
    timeouts: PubNubTimeouts,
}

impl PubNubTimeoutsBuilder {
    fn new() -> Self {
        Self {
            timeouts: PubNubTimeouts::default(),
        }
    }

    /// Set the connection timeout (TCP + TLS handshake).
    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.connection_timeout = timeout;
        self
    }

    /// Set the connection timeout in seconds.
    pub fn connection_timeout_secs(self, secs: u64) -> Self {
        self.connection_timeout(Duration::from_secs(secs))
    }

    /// Set the timeout for `time` and `publish` requests.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.request_timeout = timeout;
        self
    }

    /// Set the request timeout in seconds.
    pub fn request_timeout_secs(self, secs: u64) -> Self {
        self.request_timeout(Duration::from_secs(secs))
    }

    /// Set the upper bound for a subscribe long-poll.
    /// Set to 0 to rely on the transport alone.
    pub fn long_poll_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.long_poll_timeout = timeout;
        self
    }

    /// Set the long-poll timeout in seconds.
    pub fn long_poll_timeout_secs(self, secs: u64) -> Self {
        self.long_poll_timeout(Duration::from_secs(secs))
    }

    /// Build the timeout configuration.
    pub fn build(self) -> PubNubTimeouts {
        self.timeouts
    }
}
