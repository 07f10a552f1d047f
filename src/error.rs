//! Error types for the store core

use std::time::Duration;

use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the state machine, the engine seam, and the client
/// request handler. Each variant is a distinct client-visible outcome.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed command or query payload. A client error; never retried
    /// automatically.
    #[error("malformed payload: {0}")]
    Decode(String),

    /// Snapshot bytes could not be parsed into a valid mapping. Fatal to a
    /// restore: the replica must not start with empty or partial state.
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    /// Write not confirmed within the deadline. The outcome is unknown, not
    /// failed: the command may still commit. Retrying is safe because `Set`
    /// is an idempotent overwrite.
    #[error("write not committed within {0:?}; outcome unknown")]
    CommitTimeout(Duration),

    /// Read barrier not satisfied within the deadline. No side effect
    /// occurred; safely retryable.
    #[error("read barrier not satisfied within {0:?}")]
    ReadTimeout(Duration),

    /// I/O failure while writing or reading a snapshot stream.
    #[error("snapshot I/O failed: {0}")]
    SnapshotIo(#[from] std::io::Error),

    /// Failure reported by the consensus engine (not leader, lost quorum, ...).
    #[error("consensus engine error: {0}")]
    Engine(String),
}

impl StoreError {
    /// Whether a client may safely retry the operation that produced this
    /// error without risking a duplicate effect.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StoreError::CommitTimeout(_) | StoreError::ReadTimeout(_) | StoreError::Engine(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_is_not_retryable() {
        assert!(!StoreError::Decode("bad json".to_string()).is_retryable());
        assert!(!StoreError::CorruptSnapshot("truncated".to_string()).is_retryable());
    }

    #[test]
    fn test_timeouts_are_retryable() {
        assert!(StoreError::CommitTimeout(Duration::from_secs(3)).is_retryable());
        assert!(StoreError::ReadTimeout(Duration::from_secs(3)).is_retryable());
    }

    #[test]
    fn test_display_includes_deadline() {
        let err = StoreError::CommitTimeout(Duration::from_secs(3));
        assert!(err.to_string().contains("3s"));
        assert!(err.to_string().contains("unknown"));
    }
}
