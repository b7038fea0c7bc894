//! Main PubNub client with builder pattern.
//!
//! Provides the primary interface for publishing, subscribing and reading the
//! server clock.

use log::debug;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    error::{PubNubError, Result},
    event_handlers::EventHandlers,
    identity::ClientIdentity,
    models::{ClientConfig, ConnectionOptions, HttpVersion, PublishResult, TimeResult, TimeToken},
    request::{RequestExecutor, RequestPath},
    subscription::{PollLoop, Subscription},
    timeouts::PubNubTimeouts,
    transport::{HttpTransport, ReqwestTransport},
};

/// Main PubNub client.
///
/// Cheap to clone; clones share the same identity, configuration and HTTP
/// connection pool. Use [`PubNubClientBuilder`] to construct instances with
/// custom configuration.
///
/// # Examples
///
/// ```rust,no_run
/// use pubnub_link::PubNubClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PubNubClient::builder()
///     .publish_key("demo")
///     .subscribe_key("demo")
///     .ssl(true)
///     .build()?;
///
/// let timestamp = client.publish("hello_world", "Hello, World").await?;
/// println!("published at {}", timestamp);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PubNubClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    identity: ClientIdentity,
    executor: RequestExecutor,
    timeouts: PubNubTimeouts,
    connection_options: ConnectionOptions,
    event_handlers: EventHandlers,
}

impl PubNubClient {
    /// Create a new builder for configuring the client
    pub fn builder() -> PubNubClientBuilder {
        PubNubClientBuilder::new()
    }

    /// Build a client from `config` with default timeouts and transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Identity sent as `uuid` with every publish and subscribe request.
    pub fn identity(&self) -> ClientIdentity {
        self.inner.identity
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Get the configured timeouts
    pub fn timeouts(&self) -> &PubNubTimeouts {
        &self.inner.timeouts
    }

    pub fn connection_options(&self) -> &ConnectionOptions {
        &self.inner.connection_options
    }

    /// Read the server clock as a decimal time token.
    pub async fn time(&self) -> Result<String> {
        let path = RequestPath::new(["time", "0"]);
        let body = self
            .inner
            .executor
            .execute(&path, self.inner.timeouts.request_timeout)
            .await?;
        Ok(TimeResult::try_from(body)?.timestamp)
    }

    /// Publish `message` to `channel` and return the acknowledgement timestamp.
    ///
    /// The message is sent as JSON, so anything `Serialize` works: strings,
    /// numbers, maps, your own structs.
    ///
    /// # Errors
    ///
    /// - [`PubNubError::InvalidRequest`] for an empty channel or when no
    ///   publish key is configured
    /// - [`PubNubError::EncodeError`] when `message` cannot be serialized; no
    ///   request is sent
    /// - [`PubNubError::PublishRejected`] with the service's reason text
    pub async fn publish<T>(&self, channel: &str, message: &T) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        if channel.is_empty() {
            return Err(PubNubError::InvalidRequest("channel must not be empty".into()));
        }
        let config = &self.inner.config;
        if config.publish_key.is_empty() {
            return Err(PubNubError::InvalidRequest("publish_key is not configured".into()));
        }

        let json =
            serde_json::to_string(message).map_err(|e| PubNubError::EncodeError(e.to_string()))?;

        debug!(
            "[PUBNUB_CLIENT] Publishing to channel={} bytes={}",
            channel,
            json.len()
        );

        let path = RequestPath::new([
            "publish",
            config.publish_key.as_str(),
            config.subscribe_key.as_str(),
            "0",
            channel,
            "0",
            json.as_str(),
        ])
        .encoded()
        .query_param("uuid", self.inner.identity.to_string());

        let body = self
            .inner
            .executor
            .execute(&path, self.inner.timeouts.request_timeout)
            .await?;
        PublishResult::try_from(body)?.into_timestamp()
    }

    /// Subscribe to `channel` from the current point in time.
    ///
    /// Starts a background long-poll loop and returns the handle receiving its
    /// messages. Cancelling `cancel` (or calling [`Subscription::cancel`])
    /// stops the loop. Must be called from within a Tokio runtime.
    pub fn subscribe(&self, channel: &str, cancel: CancellationToken) -> Result<Subscription> {
        self.subscribe_from(channel, TimeToken::initial(), cancel)
    }

    /// Subscribe to `channel`, resuming after `token`.
    ///
    /// Use the token from [`SubscriptionEnd::last_token`](crate::SubscriptionEnd::last_token)
    /// of an earlier subscription to continue without gaps or repeats.
    pub fn subscribe_from(
        &self,
        channel: &str,
        token: TimeToken,
        cancel: CancellationToken,
    ) -> Result<Subscription> {
        if channel.is_empty() {
            return Err(PubNubError::InvalidRequest("channel must not be empty".into()));
        }

        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            PubNubError::InternalError(format!("subscribe requires a Tokio runtime: {}", e))
        })?;

        let inner = &self.inner;
        let poll_loop = PollLoop {
            executor: inner.executor.clone(),
            subscribe_key: inner.config.subscribe_key.clone(),
            channel: channel.to_string(),
            identity: inner.identity,
            token: token.clone(),
            long_poll_timeout: inner.timeouts.long_poll_timeout,
            options: inner.connection_options.clone(),
            handlers: inner.event_handlers.clone(),
        };

        debug!(
            "[PUBNUB_CLIENT] Subscribing: channel={} token={}",
            channel, token
        );

        // Capacity 1: the loop hands over one message at a time.
        let (tx, rx) = mpsc::channel(1);
        let cancel = cancel.child_token();
        let task = runtime.spawn(poll_loop.run(tx, cancel.clone()));

        Ok(Subscription::new(channel.to_string(), rx, cancel, task, token))
    }
}

impl std::fmt::Debug for PubNubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PubNubClient")
            .field("origin", &self.inner.executor.origin())
            .field("identity", &self.inner.identity)
            .field("timeouts", &self.inner.timeouts)
            .finish()
    }
}

/// Builder for configuring [`PubNubClient`] instances.
pub struct PubNubClientBuilder {
    config: ClientConfig,
    timeouts: PubNubTimeouts,
    connection_options: ConnectionOptions,
    event_handlers: EventHandlers,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl PubNubClientBuilder {
    fn new() -> Self {
        Self {
            config: ClientConfig::new("", ""),
            timeouts: PubNubTimeouts::default(),
            connection_options: ConnectionOptions::default(),
            event_handlers: EventHandlers::default(),
            transport: None,
        }
    }

    /// Replace all keys and origin settings at once.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn publish_key(mut self, key: impl Into<String>) -> Self {
        self.config.publish_key = key.into();
        self
    }

    /// Set the subscribe key (required)
    pub fn subscribe_key(mut self, key: impl Into<String>) -> Self {
        self.config.subscribe_key = key.into();
        self
    }

    pub fn secret_key(mut self, key: impl Into<String>) -> Self {
        self.config.secret_key = Some(key.into());
        self
    }

    pub fn cipher_key(mut self, key: impl Into<String>) -> Self {
        self.config.cipher_key = Some(key.into());
        self
    }

    /// Use `https` for all requests
    pub fn ssl(mut self, ssl: bool) -> Self {
        self.config.ssl = ssl;
        self
    }

    /// Override the origin host (default `pubsub.pubnub.com`)
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.config.origin = origin.into();
        self
    }

    /// Set custom timeout configuration
    ///
    /// # Example
    /// ```rust,no_run
    /// use pubnub_link::{PubNubClient, PubNubTimeouts};
    /// use std::time::Duration;
    ///
    /// let client = PubNubClient::builder()
    ///     .subscribe_key("demo")
    ///     .timeouts(
    ///         PubNubTimeouts::builder()
    ///             .request_timeout(Duration::from_secs(5))
    ///             .build(),
    ///     )
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn timeouts(mut self, timeouts: PubNubTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Set the reconnect policy used by subscriptions.
    ///
    /// # Example
    /// ```rust,no_run
    /// use pubnub_link::{ConnectionOptions, PubNubClient};
    ///
    /// let client = PubNubClient::builder()
    ///     .subscribe_key("demo")
    ///     .connection_options(
    ///         ConnectionOptions::new()
    ///             .with_reconnect_delay_ms(500)
    ///             .with_max_reconnect_attempts(Some(10)),
    ///     )
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn connection_options(mut self, options: ConnectionOptions) -> Self {
        self.connection_options = options;
        self
    }

    /// Set the HTTP protocol version
    pub fn http_version(mut self, version: HttpVersion) -> Self {
        self.connection_options.http_version = version;
        self
    }

    /// Register subscription lifecycle callbacks
    pub fn event_handlers(mut self, handlers: EventHandlers) -> Self {
        self.event_handlers = handlers;
        self
    }

    /// Use a custom transport instead of the default `reqwest` one.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<PubNubClient> {
        if self.config.subscribe_key.is_empty() {
            return Err(PubNubError::ConfigurationError("subscribe_key is required".into()));
        }

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::with_options(
                &self.timeouts,
                &self.connection_options,
            )?),
        };

        let origin = self.config.origin_url();
        let identity = ClientIdentity::generate();
        debug!(
            "[PUBNUB_CLIENT] Built client: origin={} identity={}",
            origin, identity
        );

        Ok(PubNubClient {
            inner: Arc::new(ClientInner {
                executor: RequestExecutor::new(origin, transport),
                config: self.config,
                identity,
                timeouts: self.timeouts,
                connection_options: self.connection_options,
                event_handlers: self.event_handlers,
            }),
        })
    }
}

impl Default for PubNubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
