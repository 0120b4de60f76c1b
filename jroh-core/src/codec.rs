//! Codec for JSON-RPC envelope serialization and deserialization
//!
//! Thin wrappers over serde_json that map encode failures to
//! `Error::Serialization` and decode failures to `Error::Deserialization`,
//! keeping the two sides of the taxonomy distinct at the one place where
//! they could blur together.

use crate::error::{Error, Result};
use crate::types::Response;
use serde::Serialize;

/// Encode any serializable envelope to a JSON string
///
/// # Examples
///
/// ```rust
/// use jroh_core::{codec, Request};
/// use serde_json::json;
///
/// let request = Request::new("ping", json!(null), 1);
/// let encoded = codec::encode(&request).unwrap();
/// assert!(encoded.contains("\"method\":\"ping\""));
/// ```
pub fn encode<T: Serialize>(msg: &T) -> Result<String> {
    serde_json::to_string(msg).map_err(|e| Error::Serialization(e.to_string()))
}

/// Convert caller-supplied params into the envelope's payload value
///
/// `()` and `None` both become JSON `null`, which the request envelope
/// serializes explicitly for wire compatibility.
pub fn to_params<P: Serialize>(params: P) -> Result<serde_json::Value> {
    serde_json::to_value(params).map_err(|e| Error::Serialization(e.to_string()))
}

/// Decode a raw HTTP response body into a response envelope
///
/// Failure here means the server returned something that is not a JSON-RPC
/// response at all; it is reported as `Error::Deserialization`, never as a
/// protocol error.
pub fn decode_response(data: &str) -> Result<Response> {
    serde_json::from_str(data).map_err(|e| Error::Deserialization(e.to_string()))
}
