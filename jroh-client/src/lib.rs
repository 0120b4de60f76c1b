//! JSON-RPC 2.0 client implementation over HTTP
//!
//! This crate provides a client for invoking remote procedures with the
//! JSON-RPC 2.0 envelope over HTTP POST, and a bounded pool that hands out
//! pre-configured clients for concurrent use.
//!
//! # Core Features
//!
//! - **HTTP Transport**: One synchronous POST per call, via reqwest
//! - **Request-Response**: Send requests and decode typed results
//! - **Notifications**: Fire-and-forget calls with no decoded reply
//! - **Bounded Pool**: At most N clients in flight, blocking acquire,
//!   release guaranteed on every exit path
//! - **Reconfigurable Transport**: Timeout and proxy changes take effect on
//!   the next call without replacing the client handle
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use jroh_client::Client;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("http://localhost:8080/rpc")?;
//!
//!     // Make a call and decode the result
//!     let sum: i64 = client.run("add", json!({"a": 5, "b": 3})).await?;
//!     println!("sum: {}", sum);
//!
//!     // Fire-and-forget
//!     client.notify("log", json!({"line": "added"})).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # With a Pool
//!
//! ```rust,no_run
//! use jroh_client::ClientPool;
//! use serde_json::json;
//!
//! # async fn example() -> jroh_core::Result<()> {
//! let pool = ClientPool::with_timeout("http://localhost:8080/rpc", 8, 30)?;
//!
//! // Concurrent callers share the eight clients; the ninth caller waits
//! let sum: Option<i64> = pool.execute("run", "add", json!({"a": 5, "b": 3})).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod client_builder;
mod pool;

pub use client::{Client, DEFAULT_TIMEOUT_SECS};
pub use client_builder::ClientBuilder;
pub use pool::{ClientPool, PooledClient};
