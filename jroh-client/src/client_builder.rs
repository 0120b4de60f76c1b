//! Client builder for configuring transport options at construction time
//!
//! The `ClientBuilder` provides a fluent API for configuring a client before
//! the first call. It allows you to:
//! - Set the per-call timeout
//! - Route calls through an explicit HTTP proxy
//! - Opt in to skipping TLS certificate verification
//!
//! # TLS Verification
//!
//! Verification is on by default. Same-operator internal servers often run
//! with certificates that never verify; for those, skipping verification is
//! an explicit opt-in per client, and the method name says what you are
//! buying.
//!
//! # Examples
//!
//! ```rust
//! use jroh_client::ClientBuilder;
//!
//! # fn example() -> jroh_core::Result<()> {
//! let client = ClientBuilder::new("https://internal.example:8443/rpc")
//!     .timeout_secs(30)
//!     .proxy("http://proxy.example:3128")
//!     .danger_accept_invalid_certs(true)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::client::{Client, TransportConfig};
use jroh_core::Result;
use std::time::Duration;

/// Builder for configuring and creating a [`Client`]
pub struct ClientBuilder {
    server_url: String,
    config: TransportConfig,
}

impl ClientBuilder {
    /// Create a new builder targeting the given server URL
    ///
    /// The URL is taken verbatim, path included, and cannot be changed after
    /// `build`.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            config: TransportConfig::default(),
        }
    }

    /// Set the per-call timeout in seconds (default 10)
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout = Duration::from_secs(secs);
        self
    }

    /// Route calls through the given HTTP proxy
    ///
    /// Without this, proxies are inherited from the process environment.
    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.config.proxy = Some(proxy_url.into());
        self
    }

    /// Skip TLS certificate verification for this client
    ///
    /// Only for servers whose certificates you control and cannot fix.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config.accept_invalid_certs = accept;
        self
    }

    /// Build the client
    ///
    /// Fails if the proxy URL cannot be parsed or the transport cannot be
    /// constructed.
    pub fn build(self) -> Result<Client> {
        Client::from_config(self.server_url, self.config)
    }
}
