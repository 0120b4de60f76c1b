//! Error types for jroh
//!
//! This module provides the error taxonomy for JSON-RPC-over-HTTP calls.
//! It defines two types:
//!
//! - **Error**: The call-level error enum returned to callers (uses thiserror)
//! - **ErrorObject**: The wire-format error component of a response envelope
//!
//! # Error Categories
//!
//! Each variant maps to a distinct failure the caller may want to handle
//! differently:
//!
//! - `InvalidPoolSize`: pool construction with a non-positive size; failing
//!   fast here is what prevents a pool that would block forever on acquire
//! - `Serialization`: params could not be represented as JSON; the call
//!   never leaves the process
//! - `Transport`: the HTTP request could not be sent or the connection
//!   failed (including client-side timeouts)
//! - `HttpStatus`: the server answered with status >= 400; the status code
//!   and raw body are preserved verbatim for diagnostics
//! - `Rpc`: the server returned a well-formed envelope whose error component
//!   is present; the server's own message and numeric code are preserved
//! - `Deserialization`: the response body is not valid JSON or does not fit
//!   the envelope shape - distinct from `Rpc` so callers can tell "server
//!   rejected the call" from "server returned garbage"
//! - `UnsupportedCommand`: a pool dispatch with a command other than
//!   run/notify; a caller-usage error, reported before any network I/O
//!
//! # Propagation Policy
//!
//! The client and pool layers perform no retries and no suppression; every
//! failure reaches the caller unchanged. Nothing in this crate panics on a
//! failed call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for jroh operations
pub type Result<T> = std::result::Result<T, Error>;

/// Call-level error returned by `run`, `notify` and pool dispatch
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Pool constructed with a size that cannot serve any caller
    #[error("pool size must be at least 1, got {0}")]
    InvalidPoolSize(usize),

    /// Params or result types cannot be represented as JSON
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The HTTP request could not be sent or the connection failed
    ///
    /// Covers DNS failures, refused connections, broken proxies and
    /// client-side timeouts - everything below the HTTP status line.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with an HTTP status >= 400
    ///
    /// The raw body is kept verbatim; servers in the field put their real
    /// diagnostics there rather than in the status line.
    #[error("received HTTP status {status} with body {body}")]
    HttpStatus {
        /// The HTTP status code of the response
        status: u16,
        /// The raw response body, read to completion
        body: String,
    },

    /// The server returned an envelope with a present error component
    ///
    /// Message text comes straight from the server. The numeric code is
    /// preserved so callers can branch on well-known values such as
    /// -32601 (method not found).
    #[error("JSON-RPC error {code}: {message}")]
    Rpc {
        /// Server-supplied error code
        code: i64,
        /// Server-supplied error message
        message: String,
    },

    /// The response body is not valid JSON or not a response envelope
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Pool dispatch with a command other than "run" or "notify"
    #[error("unsupported command: {0}")]
    UnsupportedCommand(String),
}

/// JSON-RPC 2.0 error object as it appears on the wire
///
/// This is the `error` component of a response envelope. Both fields default
/// on decode so that servers emitting partial error objects still parse;
/// whether the object counts as a real error is decided by
/// `Response::error_object`, not here.
///
/// # Examples
///
/// ```rust
/// use jroh_core::ErrorObject;
///
/// let err: ErrorObject = serde_json::from_str(
///     r#"{"code":-32601,"message":"Method not found"}"#
/// ).unwrap();
/// assert_eq!(err.code, -32601);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Numeric error code; 0 is the zero-value sentinel, not a real code
    #[serde(default)]
    pub code: i64,
    /// Human-readable error message
    #[serde(default)]
    pub message: String,
}

impl std::fmt::Display for ErrorObject {
    /// Formats as "[code] message" for easy readability in logs
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}
