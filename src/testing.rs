//! Testing utilities for integration tests
//!
//! `TestServer` runs a full node (store, engine, HTTP API) in-process on an
//! ephemeral port. `StalledEngine` never resolves, for exercising the
//! deadline paths.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::api::{create_router, ApiState};
use crate::config::NodeConfig;
use crate::engine::{ConsensusEngine, LocalEngine};
use crate::error::Result;
use crate::state_machine::{ApplyResult, KvStore};

/// A store node bound to an ephemeral port for tests.
pub struct TestServer {
    /// HTTP address the node listens on
    pub addr: SocketAddr,
    /// The engine backing the node
    pub engine: Arc<LocalEngine<KvStore>>,
    /// The replicated state, for direct inspection
    pub store: Arc<KvStore>,
    http_shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Start a node with default test config (no snapshot persistence).
    pub async fn start() -> Self {
        Self::start_with_config(NodeConfig::default()).await
    }

    /// Start a node with the given config on an ephemeral port.
    pub async fn start_with_config(config: NodeConfig) -> Self {
        let store = Arc::new(KvStore::new());
        let engine = match &config.snapshot_path {
            Some(path) => Arc::new(
                LocalEngine::with_snapshots(store.clone(), path, config.snapshot_threshold)
                    .expect("snapshot recovery failed"),
            ),
            None => Arc::new(LocalEngine::new(store.clone())),
        };
        Self::serve(engine, store, &config).await
    }

    async fn serve(
        engine: Arc<LocalEngine<KvStore>>,
        store: Arc<KvStore>,
        config: &NodeConfig,
    ) -> Self {
        let state = ApiState::new(
            engine.clone(),
            config.write_timeout,
            config.read_timeout,
        );
        let app = create_router(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (http_shutdown_tx, http_shutdown_rx) = oneshot::channel();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = http_shutdown_rx.await;
                })
                .await
                .unwrap();
        });

        TestServer {
            addr,
            engine,
            store,
            http_shutdown_tx: Some(http_shutdown_tx),
        }
    }

    /// Base URL of the node's HTTP API.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Shut the HTTP server down gracefully.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.http_shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Engine whose calls never resolve. Exercises the handler deadline paths.
pub struct StalledEngine;

#[async_trait]
impl ConsensusEngine for StalledEngine {
    async fn propose(&self, _payload: Vec<u8>) -> Result<ApplyResult> {
        std::future::pending().await
    }

    async fn linearizable_read(&self, _key: &str) -> Result<Option<String>> {
        std::future::pending().await
    }
}
