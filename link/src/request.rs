//! Request execution against the PubNub REST API.
//!
//! Every endpoint is a `GET` of `origin/segment/segment/...?query` answered
//! with a JSON array. [`RequestExecutor`] owns URL assembly, the protocol
//! headers and body decoding. It never retries: only the subscription loop
//! knows which failures are safe to repeat without losing stream position.

use log::debug;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::{form_urlencoded, Url};

use crate::{
    error::{PubNubError, Result},
    timeouts::PubNubTimeouts,
    transport::HttpTransport,
};

/// REST API version sent in the `V` header.
pub const PROTOCOL_VERSION: &str = "3.3";

/// Value of the `User-Agent` header.
pub const USER_AGENT: &str = concat!("pubnub-link/", env!("CARGO_PKG_VERSION"));

/// Headers attached to every request.
pub fn protocol_headers() -> Vec<(String, String)> {
    vec![
        ("V".to_string(), PROTOCOL_VERSION.to_string()),
        ("User-Agent".to_string(), USER_AGENT.to_string()),
        ("Accept".to_string(), "*/*".to_string()),
    ]
}

/// Path segments and query parameters of a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath {
    segments: Vec<String>,
    encode: bool,
    query: Vec<(String, String)>,
}

impl RequestPath {
    /// Segments are joined verbatim. Use [`RequestPath::encoded`] when any of
    /// them may contain characters that are unsafe in a URL path.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            encode: false,
            query: Vec::new(),
        }
    }

    /// Percent-encode each segment independently.
    pub fn encoded(mut self) -> Self {
        self.encode = true;
        self
    }

    /// Append a query parameter.
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_encoded(&self) -> bool {
        self.encode
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// First segment, which names the endpoint (`time`, `publish`, ...).
    pub fn endpoint(&self) -> &str {
        self.segments.first().map(String::as_str).unwrap_or("")
    }
}

/// Percent-encode a single path segment.
///
/// Form encoding escapes every reserved character including `/`, `?` and `#`.
/// It renders spaces as `+`, which a path would keep literally, so those are
/// rewritten to `%20`. A literal `+` is already escaped as `%2B`, so any `+`
/// left in the output stands for a space.
pub fn encode_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Build `origin + "/" + join(segments, "/") + "?" + encode(query)`.
///
/// The `?` is omitted when there are no query parameters.
pub fn build_url(origin: &str, path: &RequestPath) -> Result<Url> {
    if path.segments.is_empty() {
        return Err(PubNubError::InvalidRequest("empty path segments".to_string()));
    }

    let joined = if path.encode {
        path.segments
            .iter()
            .map(|s| encode_segment(s))
            .collect::<Vec<_>>()
            .join("/")
    } else {
        path.segments.join("/")
    };

    let mut url = Url::parse(&format!("{}/{}", origin.trim_end_matches('/'), joined))?;

    if !path.query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(path.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    Ok(url)
}

/// Decode a response body that must be a JSON array.
pub fn decode_array(body: &[u8]) -> Result<Vec<JsonValue>> {
    serde_json::from_slice::<Vec<JsonValue>>(body).map_err(|e| {
        let preview = String::from_utf8_lossy(&body[..body.len().min(120)]).into_owned();
        PubNubError::DecodeError(format!("{} (body: {:?})", e, preview))
    })
}

/// Executes requests for one origin over an [`HttpTransport`].
///
/// Holds only immutable configuration, so clones can be used concurrently.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    origin: Arc<str>,
    headers: Arc<[(String, String)]>,
    transport: Arc<dyn HttpTransport>,
}

impl RequestExecutor {
    pub fn new(origin: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        let origin: String = origin.into();
        Self {
            origin: Arc::from(origin.trim_end_matches('/')),
            headers: protocol_headers().into(),
            transport,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Full URL a request for `path` would be sent to.
    pub fn url_for(&self, path: &RequestPath) -> Result<Url> {
        build_url(&self.origin, path)
    }

    /// Perform the request and decode the body as a JSON array.
    ///
    /// `deadline` bounds the whole call; expiry yields
    /// [`PubNubError::TimeoutError`]. A zero deadline leaves timing to the
    /// transport.
    pub async fn execute(&self, path: &RequestPath, deadline: Duration) -> Result<Vec<JsonValue>> {
        let url = self.url_for(path)?;
        let endpoint = path.endpoint();

        debug!("[PUBNUB_HTTP] GET /{} (deadline={:?})", endpoint, deadline);
        let start = Instant::now();

        let request = self.transport.get(url, self.headers.to_vec());
        let body = if PubNubTimeouts::is_no_timeout(deadline) {
            request.await?
        } else {
            tokio::time::timeout(deadline, request).await.map_err(|_| {
                PubNubError::TimeoutError(format!(
                    "no response from /{} within {:?}",
                    endpoint, deadline
                ))
            })??
        };

        debug!(
            "[PUBNUB_HTTP] /{} responded: bytes={} duration_ms={}",
            endpoint,
            body.len(),
            start.elapsed().as_millis()
        );

        decode_array(&body)
    }
}
