//! Common test utilities for jroh-client integration tests
//!
//! This module provides a minimal mock HTTP server for scenarios the
//! canned-response mocking crate cannot express: response delays, in-flight
//! concurrency tracking, and acting as a forward proxy target.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing_subscriber::EnvFilter;

/// Install a test subscriber once so RUST_LOG=debug surfaces client traces
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Mock HTTP server for client testing
///
/// Answers every request with one canned status and body, after an optional
/// delay. Tracks total hits and the maximum number of requests that were in
/// flight simultaneously, which is what the pool-bounding tests assert on.
pub struct MockHttpServer {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockHttpServer {
    /// Start a server answering with the given status, JSON body and delay
    pub async fn start(status: u16, body: &str, delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let hits = Arc::new(AtomicUsize::new(0));
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_in_flight = Arc::new(AtomicUsize::new(0));

        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason(status),
            body.len(),
            body
        );

        {
            let hits = hits.clone();
            let in_flight = in_flight.clone();
            let max_in_flight = max_in_flight.clone();
            tokio::spawn(async move {
                loop {
                    let Ok((stream, _)) = listener.accept().await else {
                        break;
                    };
                    let hits = hits.clone();
                    let in_flight = in_flight.clone();
                    let max_in_flight = max_in_flight.clone();
                    let response = response.clone();
                    tokio::spawn(async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        let current = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                        max_in_flight.fetch_max(current, Ordering::SeqCst);

                        let mut stream = stream;
                        read_request(&mut stream).await;
                        tokio::time::sleep(delay).await;
                        let _ = stream.write_all(response.as_bytes()).await;
                        let _ = stream.shutdown().await;

                        in_flight.fetch_sub(1, Ordering::SeqCst);
                    });
                }
            });
        }

        Self { addr, hits, max_in_flight }
    }

    /// Base URL of the server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Total requests received
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Maximum number of requests that were in flight at once
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Read one HTTP request: headers, then the content-length body
async fn read_request(stream: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(end) = find_headers_end(&buf) else {
            continue;
        };

        let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);

        let mut remaining = content_length.saturating_sub(buf.len() - (end + 4));
        while remaining > 0 {
            let n = stream.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                return;
            }
            remaining = remaining.saturating_sub(n);
        }
        return;
    }
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|window| window == b"\r\n\r\n")
}
