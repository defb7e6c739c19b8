//! End-to-end stream tests using wiremock.
//!
//! These tests serve a canned SSE body over HTTP and verify that the
//! client and consumer together decode snapshots and report the right
//! termination outcome.

use vramwatch::client::{ClientError, VramClient};
use vramwatch::consumer::{consume_stream, CancelFlag, StreamOutcome};
use vramwatch::models::Snapshot;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAYLOAD: &str = r#"{"total_vram_bytes":100,"used_kv_cache_bytes":40,"allocated_vram_bytes":80,"prefix_cache_hit_rate":55.5,"models":[]}"#;

/// Frame payloads the way the server does: a connect comment, then
/// one `data:` line per event, blank-line terminated.
fn sse_body(payloads: &[&str]) -> String {
    let mut body = String::from(": connected\n\n");
    for payload in payloads {
        body.push_str("data: ");
        body.push_str(payload);
        body.push_str("\n\n");
    }
    body
}

async fn mount_stream(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/vram/stream"))
        .and(header("Accept", "text/event-stream"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "text/event-stream"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_stream_delivers_snapshots() {
    let server = MockServer::start().await;
    mount_stream(&server, sse_body(&[PAYLOAD, PAYLOAD])).await;

    let client = VramClient::new(server.uri()).expect("client");
    let bytes = client.connect().await.expect("connect");

    let mut seen: Vec<(u64, Snapshot)> = Vec::new();
    let outcome = consume_stream(bytes, &CancelFlag::new(), |n, snap| {
        seen.push((n, snap.clone()));
    })
    .await;

    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].0, 1);
    assert_eq!(seen[1].0, 2);
    assert_eq!(seen[0].1.total_vram_bytes, 100);
    assert_eq!(seen[0].1.prefix_cache_hit_rate, 55.5);
    match outcome {
        StreamOutcome::ClosedNormally { stats } => {
            assert_eq!(stats.snapshots_decoded, 2);
            assert_eq!(stats.lines_read, 6);
        }
        other => panic!("expected ClosedNormally, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vram/stream"))
        .respond_with(ResponseTemplate::new(503).set_body_string("warming up"))
        .mount(&server)
        .await;

    let client = VramClient::new(server.uri()).expect("client");
    match client.connect().await {
        Err(ClientError::Status { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "warming up");
        }
        other => panic!("expected status error, got {:?}", other.map(|_| "stream")),
    }
}

#[tokio::test]
async fn test_connection_refused_is_fatal() {
    // Nothing listens on this port
    let client = VramClient::new("http://127.0.0.1:1").expect("client");
    match client.connect().await {
        Err(ClientError::Request(_)) => {}
        other => panic!("expected request error, got {:?}", other.map(|_| "stream")),
    }
}

#[tokio::test]
async fn test_empty_body_reports_closed_empty() {
    let server = MockServer::start().await;
    mount_stream(&server, String::new()).await;

    let client = VramClient::new(server.uri()).expect("client");
    let bytes = client.connect().await.expect("connect");

    let outcome = consume_stream(bytes, &CancelFlag::new(), |_, _| {
        panic!("no snapshot expected");
    })
    .await;
    assert!(matches!(outcome, StreamOutcome::ClosedEmpty));
}

#[tokio::test]
async fn test_bad_payload_does_not_stop_the_stream() {
    let server = MockServer::start().await;
    mount_stream(&server, sse_body(&[r#"{"total_vram_byt"#, PAYLOAD])).await;

    let client = VramClient::new(server.uri()).expect("client");
    let bytes = client.connect().await.expect("connect");

    let mut ordinals = Vec::new();
    let outcome = consume_stream(bytes, &CancelFlag::new(), |n, _| ordinals.push(n)).await;

    assert_eq!(ordinals, vec![1]);
    match outcome {
        StreamOutcome::ClosedNormally { stats } => {
            assert_eq!(stats.snapshots_decoded, 1);
        }
        other => panic!("expected ClosedNormally, got {:?}", other),
    }
}

#[tokio::test]
async fn test_metadata_and_keepalives_are_skipped() {
    let server = MockServer::start().await;
    let body = format!(
        ": keep-alive\n\nevent: snapshot\nid: 1\ndata: {PAYLOAD}\n\n: keep-alive\n\n"
    );
    mount_stream(&server, body).await;

    let client = VramClient::new(server.uri()).expect("client");
    let bytes = client.connect().await.expect("connect");

    let mut count = 0;
    let outcome = consume_stream(bytes, &CancelFlag::new(), |_, _| count += 1).await;

    assert_eq!(count, 1);
    assert!(matches!(outcome, StreamOutcome::ClosedNormally { .. }));
}
