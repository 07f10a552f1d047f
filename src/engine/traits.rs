//! Narrow interface to the consensus engine
//!
//! Everything the client request handler may do with the cluster goes
//! through these two calls; nothing reads or writes the replicated state
//! directly, or linearizability is lost.

use async_trait::async_trait;

use crate::error::Result;
use crate::state_machine::ApplyResult;

/// The consensus engine as seen by the client request handler.
#[async_trait]
pub trait ConsensusEngine: Send + Sync {
    /// Submit an encoded command for replication.
    ///
    /// Resolves once a quorum has committed the command and it has been
    /// applied to the local state machine, returning the apply result. An
    /// undecodable payload fails with `StoreError::Decode`; engine-side
    /// failures (lost leadership, no quorum) fail with `StoreError::Engine`.
    /// Callers bound the wait with a deadline of their own.
    async fn propose(&self, payload: Vec<u8>) -> Result<ApplyResult>;

    /// Linearizable point read.
    ///
    /// Observes every write committed before this read was issued and none
    /// committed strictly after; never serves uncommitted or stale replica
    /// state. Absent keys resolve to `None`.
    async fn linearizable_read(&self, key: &str) -> Result<Option<String>>;
}
