//! HTTP transport abstraction.
//!
//! The client only ever issues `GET` requests with a handful of fixed headers
//! and needs the raw body back. [`HttpTransport`] captures exactly that so the
//! request executor and subscription loops can run against `reqwest` in
//! production and against scripted transports in tests.

use bytes::Bytes;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::fmt;
use url::Url;

use crate::{
    error::{PubNubError, Result},
    models::{ConnectionOptions, HttpVersion},
    timeouts::PubNubTimeouts,
};

/// A minimal async HTTP client for GET requests.
///
/// Implementations handle the mechanics of the request (TLS, pooling, HTTP
/// version) and report any failure to complete it as
/// [`PubNubError::TransportError`] (or [`PubNubError::TimeoutError`]).
pub trait HttpTransport: fmt::Debug + Send + Sync {
    /// Send `GET url` with `headers` and return the response body.
    fn get(&self, url: Url, headers: Vec<(String, String)>) -> BoxFuture<'_, Result<Bytes>>;
}

/// A [`reqwest`]-backed implementation of [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with default settings.
    pub fn new() -> Result<Self> {
        Self::with_options(&PubNubTimeouts::default(), &ConnectionOptions::default())
    }

    /// Create a transport honoring the connect timeout and HTTP version.
    ///
    /// No overall request timeout is set on the underlying client: long-polls
    /// are bounded per request by the executor instead.
    pub fn with_options(timeouts: &PubNubTimeouts, options: &ConnectionOptions) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            // Keep-alive lets successive polls reuse one connection
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(std::time::Duration::from_secs(90));

        if !PubNubTimeouts::is_no_timeout(timeouts.connection_timeout) {
            builder = builder.connect_timeout(timeouts.connection_timeout);
        }

        builder = match options.http_version {
            HttpVersion::Http1 => {
                log::debug!("[PUBNUB_HTTP] Using HTTP/1.1 only");
                builder.http1_only()
            },
            HttpVersion::Http2 => {
                log::debug!("[PUBNUB_HTTP] Using HTTP/2 with prior knowledge");
                builder.http2_prior_knowledge()
            },
            HttpVersion::Auto => {
                log::debug!("[PUBNUB_HTTP] Using automatic HTTP version negotiation");
                builder
            },
        };

        let inner = builder
            .build()
            .map_err(|e| PubNubError::ConfigurationError(e.to_string()))?;

        Ok(Self { inner })
    }

    /// Wrap an existing `reqwest` client.
    pub fn from_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: Url, headers: Vec<(String, String)>) -> BoxFuture<'_, Result<Bytes>> {
        let mut builder = self.inner.get(url);
        for (name, value) in headers {
            builder = builder.header(name, value);
        }

        async move {
            let response = builder.send().await?;
            let status = response.status();

            // Intermediaries routinely answer long-polls with 502/504; those are
            // network trouble, not protocol answers. 4xx bodies still carry the
            // service's JSON (e.g. publish rejections) and are returned as-is.
            if status.is_server_error() {
                return Err(PubNubError::TransportError(format!(
                    "server responded with status {}",
                    status
                )));
            }

            Ok(response.bytes().await?)
        }
        .boxed()
    }
}
