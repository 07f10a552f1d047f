//! State machine abstraction driven by the consensus engine
//!
//! When log entries are committed, the engine applies them here.
//! Implementations must be deterministic: applying the same commands in the
//! same order must produce the same state on all replicas.

use std::io::{Read, Write};

use crate::error::Result;

/// Token returned after a command is applied.
///
/// Carries the log index the command committed at; used for acknowledgement
/// and diagnostics only, never for further state derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyResult {
    /// Position of the applied command in the agreed total order
    pub index: u64,
}

/// Apply gateway - the single entry point for committed commands.
///
/// The engine invokes `apply` strictly sequentially, one command at a time,
/// in ascending log-index order. An implementation must complete the state
/// mutation before returning, so any read serviced after the return observes
/// it, and must never reorder, batch, or skip commands.
pub trait StateMachine: Send + Sync {
    /// Apply one committed command payload at the given log index.
    ///
    /// Deterministic and total in `(current state, command)`: a well-formed
    /// command is never rejected. A payload that fails to decode returns
    /// `StoreError::Decode` with no partial application; the caller decides
    /// how to surface it upstream, this gateway does not retry.
    fn apply(&self, payload: &[u8], index: u64) -> Result<ApplyResult>;

    /// Point lookup against the applied state. Pure, no side effects, safe
    /// to call concurrently with other lookups.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Snapshot gateway - full-state transfer for log compaction and for
/// bootstrapping lagging replicas.
pub trait Snapshotable: StateMachine {
    /// Stream a snapshot of the current state to `w`.
    ///
    /// Presents a consistent, unchanging view even with concurrent lookups;
    /// a write failure on `w` surfaces to the caller without touching state.
    fn save_snapshot(&self, w: &mut dyn Write) -> Result<()>;

    /// Replace the entire current state with the snapshot decoded from `r`.
    ///
    /// Used only at startup/catch-up, never interleaved with `apply`. A
    /// malformed stream fails with `StoreError::CorruptSnapshot` and leaves
    /// the state unchanged.
    fn recover_from_snapshot(&self, r: &mut dyn Read) -> Result<()>;
}
