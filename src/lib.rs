//! JROH - JSON-RPC 2.0 Over HTTP
//!
//! This is the main convenience crate that re-exports all JROH sub-crates.
//! Use this crate if you want a single dependency for calling JSON-RPC
//! servers over HTTP.
//!
//! # Architecture
//!
//! JROH is organized into modular crates:
//!
//! - **jroh-core**: Envelope types, codec, error taxonomy
//! - **jroh-client**: HTTP JSON-RPC client and the bounded client pool
//!
//! # Quick Start - Single Client
//!
//! ```rust,no_run
//! use jroh::Client;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("http://localhost:8080/rpc")?;
//!
//!     let sum: i64 = client.run("add", json!({"a": 5, "b": 3})).await?;
//!     println!("sum: {}", sum);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Quick Start - Pooled
//!
//! ```rust,no_run
//! use jroh::ClientPool;
//! use serde_json::{json, Value};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = ClientPool::new("http://localhost:8080/rpc", 8)?;
//!
//!     let result: Option<Value> = pool.execute("run", "status", json!(null)).await?;
//!     println!("status: {:?}", result);
//!
//!     Ok(())
//! }
//! ```

// Re-export all public APIs from sub-crates
// This allows users to access everything through the `jroh::` prefix
pub use jroh_client as client;
pub use jroh_core as core;

// Convenience re-exports of the most commonly used types
pub use jroh_client::{Client, ClientBuilder, ClientPool};
pub use jroh_core::{Error, Request, Response, Result};
