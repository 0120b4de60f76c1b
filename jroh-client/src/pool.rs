//! A bounded, thread-safe pool of pre-configured JSON-RPC clients
//!
//! This module provides [`ClientPool`], which eagerly constructs a fixed
//! number of [`Client`]s against one server URL and serializes access to
//! them, so concurrent callers reuse transport configuration without ever
//! sharing a client between two outstanding calls.
//!
//! # The Invariant
//!
//! At most `size` clients exist; a client is returned to the pool exactly
//! once per acquisition, on every exit path. Acquisition is guarded by a
//! counting semaphore sized to the pool, and release rides on a guard's
//! `Drop`, so an error return, an early `?`, or a panic in the wrapped call
//! all still put the client back.
//!
//! # Backpressure
//!
//! [`ClientPool::acquire`] waits until a client is free; that wait is the
//! pool's sole backpressure mechanism, bounding in-flight calls to the pool
//! size. There is no timeout on acquisition itself - a caller can wait
//! indefinitely if every client stays busy. Callers that need a bounded wait
//! can wrap the call in `tokio::time::timeout`.
//!
//! # Example
//!
//! ```rust,no_run
//! use jroh_client::ClientPool;
//! use serde_json::{json, Value};
//!
//! # async fn example() -> jroh_core::Result<()> {
//! let pool = ClientPool::new("http://localhost:8080/rpc", 4)?;
//!
//! // Command dispatch, matched case-insensitively
//! let sum: Option<i64> = pool.execute("run", "add", json!({"a": 5, "b": 3})).await?;
//! assert_eq!(sum, Some(8));
//!
//! let none: Option<Value> = pool.execute("notify", "log", json!("added")).await?;
//! assert!(none.is_none());
//! # Ok(())
//! # }
//! ```

use crate::client::DEFAULT_TIMEOUT_SECS;
use crate::{Client, ClientBuilder};
use jroh_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ops::Deref;
use std::sync::Mutex;
use tokio::sync::{Semaphore, SemaphorePermit};

/// The two operations a pool can dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Run,
    Notify,
}

impl Command {
    /// Parse a command name, case-insensitively
    ///
    /// Parsing happens before a client is acquired, so an unsupported
    /// command never consumes a pool slot and never contacts the server.
    fn parse(raw: &str) -> Result<Self> {
        if raw.eq_ignore_ascii_case("run") {
            Ok(Command::Run)
        } else if raw.eq_ignore_ascii_case("notify") {
            Ok(Command::Notify)
        } else {
            Err(Error::UnsupportedCommand(raw.to_string()))
        }
    }
}

/// A client checked out from the pool
///
/// Derefs to [`Client`] for the duration of the checkout and returns the
/// client to the pool when dropped. The semaphore permit is released only
/// after the client is back in the idle set, so a waiter woken by the permit
/// always finds a client to take.
pub struct PooledClient<'a> {
    pool: &'a ClientPool,
    client: Option<Client>,
    _permit: SemaphorePermit<'a>,
}

impl Deref for PooledClient<'_> {
    type Target = Client;

    fn deref(&self) -> &Client {
        // Present from acquisition until Drop takes it back
        self.client.as_ref().expect("pooled client already returned")
    }
}

impl Drop for PooledClient<'_> {
    fn drop(&mut self) {
        if let Some(client) = self.client.take() {
            self.pool.put_back(client);
        }
        // _permit drops after this body, releasing the slot last
    }
}

/// Bounded pool of JSON-RPC clients sharing one server URL and timeout
///
/// Size and per-client configuration are fixed at construction; the pool is
/// created once at application startup and lives for the application's
/// duration.
#[derive(Debug)]
pub struct ClientPool {
    clients: Mutex<Vec<Client>>,
    permits: Semaphore,
    size: usize,
}

impl ClientPool {
    /// Create a pool of `size` clients with the default timeout
    ///
    /// Fails fast with [`Error::InvalidPoolSize`] when `size` is zero - a
    /// zero-sized pool would otherwise block every caller forever.
    pub fn new(server_url: impl Into<String>, size: usize) -> Result<Self> {
        Self::with_timeout(server_url, size, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a pool of `size` clients with the given per-call timeout
    pub fn with_timeout(
        server_url: impl Into<String>,
        size: usize,
        timeout_secs: u64,
    ) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidPoolSize(size));
        }

        let server_url = server_url.into();
        let mut clients = Vec::with_capacity(size);
        for _ in 0..size {
            clients.push(
                ClientBuilder::new(&server_url)
                    .timeout_secs(timeout_secs)
                    .build()?,
            );
        }

        Ok(Self {
            clients: Mutex::new(clients),
            permits: Semaphore::new(size),
            size,
        })
    }

    /// The fixed number of clients in the pool
    pub fn size(&self) -> usize {
        self.size
    }

    /// How many clients are currently idle
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Check out a client, waiting until one is free
    ///
    /// The returned guard puts the client back on drop; callers never
    /// release explicitly.
    pub async fn acquire(&self) -> PooledClient<'_> {
        // The semaphore is never closed, so acquire cannot fail
        let permit = self
            .permits
            .acquire()
            .await
            .expect("pool semaphore closed");
        let client = self
            .clients
            .lock()
            .expect("client pool mutex poisoned")
            .pop()
            .expect("permit held without an idle client");
        tracing::debug!(available = self.available(), "client checked out");
        PooledClient { pool: self, client: Some(client), _permit: permit }
    }

    fn put_back(&self, client: Client) {
        self.clients
            .lock()
            .expect("client pool mutex poisoned")
            .push(client);
    }

    /// Dispatch `command` ("run" or "notify", case-insensitive) on a pooled client
    ///
    /// `run` yields `Some` decoded result; `notify` yields `None`. Any other
    /// command fails with [`Error::UnsupportedCommand`] before a client is
    /// acquired. The client is returned to the pool on every path, error
    /// returns included.
    #[tracing::instrument(skip(self, params))]
    pub async fn execute<P, R>(&self, command: &str, method: &str, params: P) -> Result<Option<R>>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let command = Command::parse(command)?;
        let client = self.acquire().await;
        match command {
            Command::Run => client.run(method, params).await.map(Some),
            Command::Notify => client.notify(method, params).await.map(|()| None),
        }
    }

    /// Execute a call on a pooled client and decode its result
    pub async fn run<P, R>(&self, method: &str, params: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let client = self.acquire().await;
        client.run(method, params).await
    }

    /// Execute a notification on a pooled client
    pub async fn notify<P: Serialize>(&self, method: &str, params: P) -> Result<()> {
        let client = self.acquire().await;
        client.notify(method, params).await
    }
}
