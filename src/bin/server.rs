//! Store server binary
//!
//! Runs a single-voter node: the in-process engine commits instantly and
//! persists snapshots to disk. A multi-replica deployment swaps in a real
//! consensus engine behind the same `ConsensusEngine` seam.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use replikv::api::{create_router, ApiState};
use replikv::config::NodeConfig;
use replikv::engine::LocalEngine;
use replikv::state_machine::KvStore;

/// Strongly-consistent key-value store node
#[derive(Parser, Debug)]
#[command(name = "replikv-server")]
#[command(about = "Replicated key-value store node with an HTTP client API")]
struct Args {
    /// Address for the client HTTP API
    #[arg(long, default_value = "127.0.0.1:21001")]
    http_addr: SocketAddr,

    /// Snapshot file path; omit to disable snapshot persistence
    #[arg(long)]
    snapshot_path: Option<PathBuf>,

    /// Take a snapshot after this many applied entries (0 disables)
    #[arg(long, default_value_t = 10_000)]
    snapshot_threshold: u64,

    /// Write commit deadline in milliseconds
    #[arg(long, default_value_t = 3000)]
    write_timeout_ms: u64,

    /// Linearizable read deadline in milliseconds
    #[arg(long, default_value_t = 3000)]
    read_timeout_ms: u64,
}

impl Args {
    fn into_config(self) -> NodeConfig {
        let mut config = NodeConfig::default()
            .with_http_addr(self.http_addr)
            .with_timeouts(
                Duration::from_millis(self.write_timeout_ms),
                Duration::from_millis(self.read_timeout_ms),
            );
        if let Some(path) = self.snapshot_path {
            config = config.with_snapshots(path, self.snapshot_threshold);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Args::parse().into_config();

    let store = Arc::new(KvStore::new());
    let engine = match &config.snapshot_path {
        Some(path) => Arc::new(LocalEngine::with_snapshots(
            store.clone(),
            path,
            config.snapshot_threshold,
        )?),
        None => Arc::new(LocalEngine::new(store.clone())),
    };
    info!(keys = store.len(), "state machine ready");

    let state = ApiState::new(engine, config.write_timeout, config.read_timeout);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;
    info!(addr = %config.http_addr, "client API listening");
    info!("  POST /write   - propose a command");
    info!("  POST /read    - linearizable read");
    info!("  GET  /metrics - metrics placeholder");

    axum::serve(listener, app).await?;
    Ok(())
}
