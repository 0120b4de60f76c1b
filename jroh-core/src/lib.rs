//! Core JSON-RPC 2.0 envelope types and codec for jroh
//!
//! This crate provides the foundational types for invoking remote procedures
//! with the JSON-RPC 2.0 envelope over HTTP. It includes:
//!
//! - **Types**: Request and response envelopes with the presence rules
//!   deployed servers actually follow
//! - **Codec**: Serialization and deserialization helpers that keep encode
//!   and decode failures distinct in the error taxonomy
//! - **Error handling**: One error variant per failure category a caller
//!   may want to branch on
//!
//! # Architecture
//!
//! The crate is transport-agnostic - it handles envelope construction and
//! decoding but performs no I/O. The `jroh-client` crate builds on this
//! foundation to provide the HTTP transport and the bounded client pool.
//!
//! # Example
//!
//! ```rust
//! use jroh_core::{codec, Request, Response};
//! use serde_json::json;
//!
//! let request = Request::new("add", json!({"a": 5, "b": 3}), 10000001);
//! let encoded = codec::encode(&request).unwrap();
//! assert!(encoded.contains("\"method\":\"add\""));
//!
//! let response = codec::decode_response(
//!     r#"{"jsonrpc":"2.0","result":8,"id":10000001}"#
//! ).unwrap();
//! assert!(response.is_success());
//! ```

pub mod codec;
pub mod error;
pub mod types;

// Re-export the most commonly used types for convenience
pub use error::{Error, ErrorObject, Result};
pub use types::{Request, Response, PROTOCOL_VERSION};
