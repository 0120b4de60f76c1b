//! Integration tests for pool bounding, release discipline, and transport
//! reconfiguration, against a mock server that can delay its responses.

mod common;

use common::MockHttpServer;
use futures::future::join_all;
use jroh_client::{Client, ClientPool};
use jroh_core::Error;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

const OK_BODY: &str = r#"{"jsonrpc":"2.0","result":"ok","id":1}"#;

#[tokio::test]
async fn test_pool_of_n_bounds_in_flight_calls_to_n() {
    common::init_tracing();
    let delay = Duration::from_millis(300);
    let server = MockHttpServer::start(200, OK_BODY, delay).await;

    let pool = Arc::new(ClientPool::new(server.url(), 2).unwrap());

    // Three concurrent calls against two clients: two proceed immediately,
    // the third waits for a release
    let started = Instant::now();
    let tasks: Vec<_> = (0..3)
        .map(|_| {
            let pool = pool.clone();
            tokio::spawn(async move {
                let result: String = pool.run("status", ()).await.unwrap();
                result
            })
        })
        .collect();

    for task in join_all(tasks).await {
        assert_eq!(task.unwrap(), "ok");
    }

    assert_eq!(server.hits(), 3);
    assert!(server.max_in_flight() <= 2, "pool let more than 2 calls in flight");
    // The third call had to wait for a full server round trip
    assert!(started.elapsed() >= delay * 2);
    assert_eq!(pool.available(), 2);
}

#[tokio::test]
async fn test_pool_is_not_exhausted_by_a_burst_of_failures() {
    let server = MockHttpServer::start(500, "boom", Duration::ZERO).await;
    let pool = ClientPool::new(server.url(), 2).unwrap();

    // One failing call per pool slot, then as many again
    for _ in 0..4 {
        let err = pool.run::<_, Value>("status", ()).await.unwrap_err();
        assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
    }

    assert_eq!(pool.available(), 2);

    // A further call completes instead of blocking on a leaked slot
    let result = tokio::time::timeout(
        Duration::from_secs(2),
        pool.run::<_, Value>("status", ()),
    )
    .await
    .expect("pool must still serve calls after failures");
    assert!(result.is_err());
}

#[tokio::test]
async fn test_set_timeout_takes_effect_on_the_next_call() {
    let server = MockHttpServer::start(200, OK_BODY, Duration::from_secs(5)).await;

    let client = Client::new(server.url()).unwrap();
    client.set_timeout(1).await.unwrap();

    let started = Instant::now();
    let err = client.run::<_, Value>("slow", ()).await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)), "expected a timeout, got {:?}", err);
    // Timed out at the new 1s setting, well before the server answered
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_set_proxy_routes_the_next_call_through_the_proxy() {
    // The proxy answers every absolute-form request itself; the target host
    // does not resolve, so a hit proves the proxy carried the call
    let proxy = MockHttpServer::start(200, OK_BODY, Duration::ZERO).await;

    let client = Client::new("http://jroh-test.invalid/rpc").unwrap();
    client.set_proxy(proxy.url()).await.unwrap();

    client.notify("ping", ()).await.unwrap();
    assert_eq!(proxy.hits(), 1);
}

#[tokio::test]
async fn test_pooled_clients_share_the_constructed_timeout() {
    let server = MockHttpServer::start(200, OK_BODY, Duration::from_secs(5)).await;
    let pool = ClientPool::with_timeout(server.url(), 2, 1).unwrap();

    let started = Instant::now();
    let err = pool.run::<_, Value>("slow", ()).await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(pool.available(), 2);
}
