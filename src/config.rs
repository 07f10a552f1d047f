//! Node configuration
//!
//! Passed explicitly into construction of the engine and the HTTP layer; no
//! process-wide globals, so tests can run multiple independent instances.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for a single store node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Address the client HTTP API listens on (default: 127.0.0.1:21001)
    pub http_addr: SocketAddr,
    /// Deadline for a write to be confirmed committed (default: 3s)
    pub write_timeout: Duration,
    /// Deadline for the linearizable read barrier (default: 3s)
    pub read_timeout: Duration,
    /// Where the engine persists snapshots; `None` disables persistence
    pub snapshot_path: Option<PathBuf>,
    /// Number of applied entries between automatic snapshots (default: 10000)
    /// Set to 0 to disable automatic snapshots
    pub snapshot_threshold: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            http_addr: "127.0.0.1:21001".parse().expect("valid default address"),
            write_timeout: Duration::from_secs(3),
            read_timeout: Duration::from_secs(3),
            snapshot_path: None,
            snapshot_threshold: 10_000,
        }
    }
}

impl NodeConfig {
    /// Create a config with a custom HTTP listen address
    pub fn with_http_addr(mut self, addr: SocketAddr) -> Self {
        self.http_addr = addr;
        self
    }

    /// Create a config with custom write and read deadlines
    pub fn with_timeouts(mut self, write: Duration, read: Duration) -> Self {
        self.write_timeout = write;
        self.read_timeout = read;
        self
    }

    /// Create a config with snapshot persistence enabled
    pub fn with_snapshots(mut self, path: PathBuf, threshold: u64) -> Self {
        self.snapshot_path = Some(path);
        self.snapshot_threshold = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NodeConfig::default();
        assert_eq!(config.write_timeout, Duration::from_secs(3));
        assert_eq!(config.read_timeout, Duration::from_secs(3));
        assert!(config.snapshot_path.is_none());
    }

    #[test]
    fn test_builders() {
        let config = NodeConfig::default()
            .with_timeouts(Duration::from_millis(100), Duration::from_millis(50))
            .with_snapshots(PathBuf::from("/tmp/state.snap"), 500);

        assert_eq!(config.write_timeout, Duration::from_millis(100));
        assert_eq!(config.read_timeout, Duration::from_millis(50));
        assert_eq!(config.snapshot_threshold, 500);
    }
}
