//! JSON-RPC client implementation over HTTP
//!
//! This module provides the main `Client` type, which owns one HTTP transport
//! configuration (timeout, TLS policy, proxy) and knows how to build a
//! request envelope, POST it, and decode the response envelope into a
//! caller-supplied result type.
//!
//! # Transport Configuration
//!
//! The transport settings live in a small immutable [`TransportConfig`]
//! value. `set_timeout` and `set_proxy` build a fresh `reqwest::Client` from
//! the updated config and atomically swap it behind an async `RwLock`, so a
//! concurrent call never observes a half-updated transport. The `Client`
//! handle itself stays stable across mutation.
//!
//! # One Attempt Per Call
//!
//! The client performs no retries and no cancellation of in-flight calls.
//! Once a POST is issued it runs to completion or to the transport's own
//! timeout; callers own any retry policy.
//!
//! # Thread Safety
//!
//! A `Client` is safe to share behind `&self`, but it is designed for one
//! outstanding call at a time; the pool's acquire/release discipline is what
//! keeps concurrent callers off the same instance.

use jroh_core::{codec, Error, Request, Result};
use rand::Rng;
use reqwest::header::{ACCEPT, CONNECTION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::RwLock;

/// Default per-call timeout applied when no explicit value is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Generate a request id in the 8-digit range the deployed servers expect
///
/// Each id is used for exactly one outstanding request per client, so
/// collisions across calls are immaterial; the range is kept for wire
/// compatibility.
pub(crate) fn random_request_id() -> u64 {
    rand::thread_rng().gen_range(10_000_000..=99_999_999)
}

/// Immutable snapshot of the transport settings
///
/// Mutators clone this, apply the change, rebuild the HTTP handle and swap
/// both in together.
#[derive(Debug, Clone)]
pub(crate) struct TransportConfig {
    /// Per-call timeout
    pub(crate) timeout: Duration,
    /// Explicit proxy URL; `None` inherits proxies from the process
    /// environment (reqwest's default behavior)
    pub(crate) proxy: Option<String>,
    /// Skip TLS certificate verification. Off by default; enabled only
    /// through the explicit `ClientBuilder::danger_accept_invalid_certs`
    /// opt-in
    pub(crate) accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            proxy: None,
            accept_invalid_certs: false,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config
    pub(crate) fn build_transport(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .danger_accept_invalid_certs(self.accept_invalid_certs);

        if let Some(proxy) = &self.proxy {
            let proxy = reqwest::Proxy::all(proxy).map_err(|e| Error::Transport(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        builder.build().map_err(|e| Error::Transport(e.to_string()))
    }
}

/// Config and transport handle, swapped together under one lock
#[derive(Debug)]
struct TransportState {
    config: TransportConfig,
    http: reqwest::Client,
}

/// JSON-RPC client over HTTP
///
/// Executes calls against a single server URL, fixed at construction.
/// Timeout and proxy can be changed after construction and take effect on
/// the next call.
///
/// # Examples
///
/// ```rust,no_run
/// use jroh_client::Client;
/// use serde_json::json;
///
/// # async fn example() -> jroh_core::Result<()> {
/// let client = Client::new("http://localhost:8080/rpc")?;
///
/// let sum: i64 = client.run("add", json!({"a": 5, "b": 3})).await?;
/// assert_eq!(sum, 8);
///
/// client.notify("log", json!({"line": "added"})).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    server_url: String,
    state: RwLock<TransportState>,
}

impl Client {
    /// Create a client pointing at the given server URL
    ///
    /// Defaults: 10 second timeout, proxies inherited from the environment,
    /// TLS verification enabled. Use [`crate::ClientBuilder`] to change any
    /// of these at construction time.
    pub fn new(server_url: impl Into<String>) -> Result<Self> {
        crate::ClientBuilder::new(server_url).build()
    }

    pub(crate) fn from_config(server_url: String, config: TransportConfig) -> Result<Self> {
        let http = config.build_transport()?;
        Ok(Self {
            server_url,
            state: RwLock::new(TransportState { config, http }),
        })
    }

    /// The server URL this client was constructed against
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Set the per-call timeout in seconds
    ///
    /// Takes effect on the next call; calls already in flight keep the
    /// timeout they started with.
    pub async fn set_timeout(&self, secs: u64) -> Result<()> {
        self.swap_config(|config| config.timeout = Duration::from_secs(secs))
            .await
    }

    /// Route subsequent calls through the given HTTP proxy
    ///
    /// Fails if the proxy URL cannot be parsed; the previous transport stays
    /// in place in that case.
    pub async fn set_proxy(&self, proxy_url: impl Into<String>) -> Result<()> {
        let proxy_url = proxy_url.into();
        self.swap_config(|config| config.proxy = Some(proxy_url))
            .await
    }

    /// Rebuild the transport from an updated config and swap both in
    ///
    /// The new handle is built before the old state is replaced, so a build
    /// failure leaves the previous transport untouched.
    async fn swap_config(&self, apply: impl FnOnce(&mut TransportConfig)) -> Result<()> {
        let mut state = self.state.write().await;
        let mut config = state.config.clone();
        apply(&mut config);
        let http = config.build_transport()?;
        *state = TransportState { config, http };
        Ok(())
    }

    /// Execute the given method and decode the server's result
    ///
    /// Builds a request envelope with a fresh random id, POSTs it, and
    /// decodes the response envelope. A present error component becomes
    /// [`Error::Rpc`] carrying the server's code and message; otherwise the
    /// `result` field is decoded into `R` (an absent result decodes from
    /// JSON `null`).
    #[tracing::instrument(skip(self, params), fields(url = %self.server_url))]
    pub async fn run<P, R>(&self, method: &str, params: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        self.run_with_headers(method, params, &[]).await
    }

    /// Like [`Client::run`], with additional request headers
    ///
    /// The extra headers are applied after the fixed set, so they can
    /// override it when a server needs, say, a custom `Accept` value.
    pub async fn run_with_headers<P, R>(
        &self,
        method: &str,
        params: P,
        headers: &[(&str, &str)],
    ) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let request = Request::new(method, codec::to_params(params)?, random_request_id());
        tracing::debug!(method = %request.method, id = ?request.id, "dispatching call");

        let raw = self.send(codec::encode(&request)?, headers).await?;
        let response = codec::decode_response(&raw)?;

        if let Some(err) = response.error_object() {
            return Err(Error::Rpc { code: err.code, message: err.message.clone() });
        }

        let result = response.result.unwrap_or(serde_json::Value::Null);
        serde_json::from_value(result).map_err(|e| Error::Deserialization(e.to_string()))
    }

    /// Execute the given method as a notification
    ///
    /// The request carries no id, signaling that no reply is expected. The
    /// response body, if any, is read to completion but never decoded; only
    /// transport failures and HTTP status >= 400 are reported.
    #[tracing::instrument(skip(self, params), fields(url = %self.server_url))]
    pub async fn notify<P: Serialize>(&self, method: &str, params: P) -> Result<()> {
        self.notify_with_headers(method, params, &[]).await
    }

    /// Like [`Client::notify`], with additional request headers
    pub async fn notify_with_headers<P: Serialize>(
        &self,
        method: &str,
        params: P,
        headers: &[(&str, &str)],
    ) -> Result<()> {
        let request = Request::notification(method, codec::to_params(params)?);
        tracing::debug!(method = %request.method, "dispatching notification");

        self.send(codec::encode(&request)?, headers).await?;
        Ok(())
    }

    /// Own the HTTP exchange: POST the serialized envelope, drain the body
    ///
    /// The body is read to completion on every exit path, status >= 400
    /// included, so the underlying connection is never leaked with unread
    /// bytes.
    async fn send(&self, body: String, headers: &[(&str, &str)]) -> Result<String> {
        // Clone the handle out so the lock is not held across the exchange;
        // reqwest::Client is a cheap Arc clone.
        let http = self.state.read().await.http.clone();

        let mut request = http
            .post(&self.server_url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(CONNECTION, "close")
            .body(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        if status >= 400 {
            return Err(Error::HttpStatus { status, body });
        }

        Ok(body)
    }
}
