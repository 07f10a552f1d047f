//! End-to-end tests of the HTTP client API against an in-process node.

use std::fs::File;

use reqwest::StatusCode;

use replikv::config::NodeConfig;
use replikv::state_machine::{KvStore, Snapshotable};
use replikv::testing::TestServer;

#[tokio::test]
async fn test_write_read_and_snapshot_round_trip() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // Write foo=bar through the consensus path
    let response = client
        .post(server.url("/write"))
        .body(r#"{"Set":{"key":"foo","value":"bar"}}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ok");

    // A linearizable read observes the committed write
    let response = client
        .post(server.url("/read"))
        .body(r#""foo""#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "bar");

    // A key never written reads as absent
    let response = client
        .post(server.url("/read"))
        .body(r#""missing""#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Snapshot the state and restore into a fresh instance
    let mut snapshot = Vec::new();
    server.store.save_snapshot(&mut snapshot).unwrap();

    let fresh = KvStore::new();
    fresh
        .recover_from_snapshot(&mut snapshot.as_slice())
        .unwrap();
    assert_eq!(fresh.get("foo"), Some("bar".to_string()));

    server.shutdown().await;
}

#[tokio::test]
async fn test_write_rejects_malformed_command() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/write"))
        .body(r#"{"Unknown":{"key":"foo"}}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.text().await.unwrap().contains("malformed"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_reads_observe_latest_committed_write() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    for value in ["v1", "v2", "v3"] {
        let body = format!(r#"{{"Set":{{"key":"k","value":"{}"}}}}"#, value);
        let response = client
            .post(server.url("/write"))
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = client
            .post(server.url("/read"))
            .body(r#""k""#)
            .send()
            .await
            .unwrap();
        assert_eq!(response.text().await.unwrap(), value);
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let server = TestServer::start().await;

    let response = reqwest::get(server.url("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/json"
    );
    assert_eq!(response.text().await.unwrap(), "{}");

    server.shutdown().await;
}

#[tokio::test]
async fn test_state_survives_restart_via_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.snap");
    let client = reqwest::Client::new();

    // First node: write, then force a snapshot to disk
    {
        let config = NodeConfig::default().with_snapshots(path.clone(), 0);
        let server = TestServer::start_with_config(config).await;

        let response = client
            .post(server.url("/write"))
            .body(r#"{"Set":{"key":"durable","value":"yes"}}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        server.engine.snapshot_now().await.unwrap();
        server.shutdown().await;
    }

    // Second node recovers from the snapshot file at startup
    let config = NodeConfig::default().with_snapshots(path.clone(), 0);
    let server = TestServer::start_with_config(config).await;

    let response = client
        .post(server.url("/read"))
        .body(r#""durable""#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "yes");

    server.shutdown().await;

    // The snapshot on disk is itself a restorable artifact
    let standalone = KvStore::new();
    standalone
        .recover_from_snapshot(&mut File::open(&path).unwrap())
        .unwrap();
    assert_eq!(standalone.get("durable"), Some("yes".to_string()));
}
