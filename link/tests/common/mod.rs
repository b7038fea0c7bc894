#![allow(dead_code)]

use bytes::Bytes;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use pubnub_link::{
    ConnectionOptions, EventHandlers, HttpTransport, PubNubClient, PubNubError, PubNubTimeouts,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

pub const STUB_ORIGIN: &str = "http://stub.invalid";

/// In-memory transport that records every request and replays a script.
///
/// Once the script runs out, requests never complete, like a long-poll the
/// server is holding open.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<pubnub_link::Result<Bytes>>>,
    requests: Mutex<Vec<(Url, Vec<(String, String)>)>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a JSON response body.
    pub fn reply(&self, body: Value) -> &Self {
        self.reply_raw(&body.to_string())
    }

    /// Queue a raw response body.
    pub fn reply_raw(&self, body: &str) -> &Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(Bytes::from(body.to_string())));
        self
    }

    /// Queue a failed request.
    pub fn fail(&self, error: PubNubError) -> &Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn urls(&self) -> Vec<Url> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    /// Last path segment of every request, i.e. the time token of a subscribe.
    pub fn tokens(&self) -> Vec<String> {
        self.urls()
            .iter()
            .map(|url| {
                url.path_segments()
                    .and_then(|mut segments| segments.next_back())
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }

    pub fn headers(&self, index: usize) -> Vec<(String, String)> {
        self.requests.lock().unwrap()[index].1.clone()
    }

    /// Wait until at least `count` requests were made.
    pub async fn wait_for_calls(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(30), async {
            while self.call_count() < count {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap_or_else(|_| {
            panic!(
                "expected {} requests, saw {}: {:?}",
                count,
                self.call_count(),
                self.urls()
            )
        });
    }
}

impl HttpTransport for ScriptedTransport {
    fn get(&self, url: Url, headers: Vec<(String, String)>) -> BoxFuture<'_, pubnub_link::Result<Bytes>> {
        self.requests.lock().unwrap().push((url, headers));
        let next = self.script.lock().unwrap().pop_front();
        async move {
            match next {
                Some(result) => result,
                None => futures_util::future::pending().await,
            }
        }
        .boxed()
    }
}

/// Client against the scripted transport with fast retries.
pub fn client(transport: &Arc<ScriptedTransport>) -> PubNubClient {
    client_with(
        transport,
        ConnectionOptions::new()
            .with_reconnect_delay_ms(100)
            .with_max_reconnect_delay_ms(400),
        EventHandlers::new(),
    )
}

pub fn client_with(
    transport: &Arc<ScriptedTransport>,
    options: ConnectionOptions,
    handlers: EventHandlers,
) -> PubNubClient {
    PubNubClient::builder()
        .publish_key("demo-pub")
        .subscribe_key("demo-sub")
        .origin(STUB_ORIGIN)
        .timeouts(PubNubTimeouts::for_testing(5))
        .connection_options(options)
        .event_handlers(handlers)
        .transport(transport.clone())
        .build()
        .expect("client should build")
}

/// Records lifecycle events as strings, in order.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn handlers(&self) -> EventHandlers {
        let (a, b, c) = (self.0.clone(), self.0.clone(), self.0.clone());
        EventHandlers::new()
            .on_connect(move |channel| a.lock().unwrap().push(format!("connect:{}", channel)))
            .on_error(move |err| {
                b.lock()
                    .unwrap()
                    .push(format!("error:recoverable={}", err.recoverable))
            })
            .on_disconnect(move |reason| {
                c.lock()
                    .unwrap()
                    .push(format!("disconnect:cancelled={}", reason.cancelled))
            })
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}
