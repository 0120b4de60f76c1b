//! JSON-RPC 2.0 envelope types for HTTP transport
//!
//! This module implements the request and response envelopes from the
//! JSON-RPC 2.0 specification (https://www.jsonrpc.org/specification) as they
//! travel over a single HTTP POST round trip. These types are designed to be:
//!
//! - **Wire-compatible**: Field names and presence rules match servers that
//!   have been in production for years, including their quirks
//! - **Lenient on decode**: Missing response fields decode to their absent
//!   form instead of failing the whole call
//! - **Serializable**: Full serde support for JSON encoding/decoding
//!
//! # Request IDs
//!
//! Each request carries a numeric id used to correlate the response. Because
//! every request is matched 1:1 with its own HTTP response (never
//! multiplexed), the id is not load-bearing for correctness; it is carried
//! for protocol compliance. Notifications omit the id entirely, which is how
//! JSON-RPC signals "no reply expected".
//!
//! # The `params` Field
//!
//! Unlike most Rust JSON-RPC implementations, `params` is always serialized,
//! as `null` when the caller has nothing to pass. Deployed servers expect the
//! field to be present.

use crate::error::ErrorObject;
use serde::{Deserialize, Serialize};

/// The protocol version literal carried by every envelope.
pub const PROTOCOL_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request envelope
///
/// A request represents a call to a remote method. When `id` is present the
/// server is expected to answer with a [`Response`] echoing it; when `id` is
/// absent the request is a notification and no reply is decoded.
///
/// # Examples
///
/// ```rust
/// use jroh_core::Request;
/// use serde_json::json;
///
/// // A call expecting a reply
/// let req = Request::new("subtract", json!({"minuend": 42, "subtrahend": 23}), 10000001);
/// assert_eq!(req.jsonrpc, "2.0");
///
/// // A fire-and-forget notification
/// let notif = Request::notification("heartbeat", json!(null));
/// assert!(notif.id.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Protocol version - always "2.0"
    pub jsonrpc: String,
    /// Name of the remote method to invoke
    pub method: String,
    /// Parameters for the method; serialized as `null` when there are none
    pub params: serde_json::Value,
    /// Correlation id; omitted from JSON for notifications
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

impl Request {
    /// Create a request that expects a reply
    ///
    /// The `jsonrpc` field is automatically set to "2.0" per the specification.
    pub fn new(method: impl Into<String>, params: serde_json::Value, id: u64) -> Self {
        Self {
            jsonrpc: PROTOCOL_VERSION.to_string(),
            method: method.into(),
            params,
            id: Some(id),
        }
    }

    /// Create a notification (no id, no reply expected)
    ///
    /// Per JSON-RPC 2.0, the server must not answer a notification; the
    /// client reads the HTTP response body to completion but never decodes it.
    pub fn notification(method: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: PROTOCOL_VERSION.to_string(),
            method: method.into(),
            params,
            id: None,
        }
    }

    /// Check whether this request is a notification
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC 2.0 response envelope
///
/// Exactly one of `result` or `error` is semantically populated. The catch is
/// that some long-deployed servers always emit an `error` object and signal
/// success by leaving it zero-valued (`{"code":0,"message":""}`). To stay
/// compatible, error presence is decided by [`Response::error_object`] rather
/// than by the raw `error` field: the error counts as present only when its
/// code is nonzero **and** its message is non-empty.
///
/// All fields are lenient on decode; a response missing `jsonrpc` or `id`
/// still parses, matching what the deployed clients tolerated.
///
/// # Examples
///
/// ```rust
/// use jroh_core::Response;
///
/// // A zero-valued error object is treated as success
/// let raw = r#"{"jsonrpc":"2.0","result":7,"error":{"code":0,"message":""},"id":1}"#;
/// let resp: Response = serde_json::from_str(raw).unwrap();
/// assert!(resp.error_object().is_none());
///
/// // A populated error object is a real failure
/// let raw = r#"{"jsonrpc":"2.0","error":{"code":-32601,"message":"Method not found"},"id":1}"#;
/// let resp: Response = serde_json::from_str(raw).unwrap();
/// assert_eq!(resp.error_object().unwrap().code, -32601);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Protocol version - "2.0" from well-behaved servers
    #[serde(default)]
    pub jsonrpc: String,
    /// The result of the method invocation, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Error object as sent on the wire; see [`Response::error_object`]
    /// for the presence test that actually decides success or failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
    /// Echo of the request id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

impl Response {
    /// Return the error component if it is semantically present
    ///
    /// The error counts as present only when `code != 0` and the message is
    /// non-empty. A zero-valued error object, whether emitted explicitly or
    /// defaulted by the server's encoder, is treated as absent.
    pub fn error_object(&self) -> Option<&ErrorObject> {
        match &self.error {
            Some(err) if err.code != 0 && !err.message.is_empty() => Some(err),
            _ => None,
        }
    }

    /// Check if the response represents success under the presence test
    pub fn is_success(&self) -> bool {
        self.error_object().is_none()
    }
}
