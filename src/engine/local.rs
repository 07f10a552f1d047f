//! Single-voter consensus engine
//!
//! A quorum of one: every proposal commits instantly and the applied state
//! is the committed state, so the linearizable-read barrier is trivially
//! satisfied. Snapshot policy lives here, not in the state machine: after a
//! configured number of applied entries the engine streams a snapshot to
//! disk (write to temp, rename), and at construction it recovers from an
//! existing snapshot file.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::state_machine::{ApplyResult, Snapshotable};
use super::ConsensusEngine;

/// Log bookkeeping, guarded by one async mutex so applies run strictly
/// sequentially and never concurrently with a snapshot save.
struct LogPosition {
    /// Index the next committed command will be applied at
    next_index: u64,
    /// Entries applied since the last snapshot was written
    applied_since_snapshot: u64,
}

struct SnapshotPolicy {
    path: PathBuf,
    /// Snapshot after this many applied entries; 0 disables
    threshold: u64,
}

/// In-process engine driving a [`Snapshotable`] state machine.
pub struct LocalEngine<M: Snapshotable> {
    machine: Arc<M>,
    log: Mutex<LogPosition>,
    snapshots: Option<SnapshotPolicy>,
}

impl<M: Snapshotable> LocalEngine<M> {
    /// Create an engine with no snapshot persistence.
    pub fn new(machine: Arc<M>) -> Self {
        LocalEngine {
            machine,
            log: Mutex::new(LogPosition {
                next_index: 1,
                applied_since_snapshot: 0,
            }),
            snapshots: None,
        }
    }

    /// Create an engine that persists snapshots to `path` after every
    /// `threshold` applied entries (0 disables automatic snapshots).
    ///
    /// If a snapshot file already exists the state machine is rebuilt from
    /// it before the engine accepts proposals. A corrupt snapshot fails
    /// construction: the replica must not start with empty or partial state.
    pub fn with_snapshots(
        machine: Arc<M>,
        path: impl Into<PathBuf>,
        threshold: u64,
    ) -> Result<Self> {
        let path = path.into();

        if path.exists() {
            let mut file = File::open(&path)?;
            machine.recover_from_snapshot(&mut file)?;
            info!(path = %path.display(), "recovered state from snapshot");
        }

        let mut engine = Self::new(machine);
        engine.snapshots = Some(SnapshotPolicy { path, threshold });
        Ok(engine)
    }

    /// The state machine this engine drives.
    pub fn machine(&self) -> &Arc<M> {
        &self.machine
    }

    /// Write a snapshot of the current state to the configured path,
    /// regardless of the threshold. No-op without a snapshot path.
    pub async fn snapshot_now(&self) -> Result<()> {
        // Take the log mutex so the snapshot cannot interleave with apply
        let mut log = self.log.lock().await;
        if let Some(policy) = &self.snapshots {
            self.write_snapshot(&policy.path)?;
            log.applied_since_snapshot = 0;
        }
        Ok(())
    }

    fn write_snapshot(&self, path: &Path) -> Result<()> {
        // Write to temp, flush, rename: a crash mid-write never clobbers
        // the previous snapshot
        let temp_path = path.with_extension("tmp");
        let mut file = File::create(&temp_path)?;
        self.machine.save_snapshot(&mut file)?;
        file.flush()?;
        file.sync_all()?;
        fs::rename(&temp_path, path)?;
        debug!(path = %path.display(), "snapshot written");
        Ok(())
    }
}

#[async_trait]
impl<M: Snapshotable> ConsensusEngine for LocalEngine<M> {
    async fn propose(&self, payload: Vec<u8>) -> Result<ApplyResult> {
        let mut log = self.log.lock().await;

        // Single voter: commit is immediate, apply before acknowledging so
        // reads served after this return observe the write
        let index = log.next_index;
        let result = self.machine.apply(&payload, index)?;
        log.next_index += 1;
        log.applied_since_snapshot += 1;

        if let Some(policy) = &self.snapshots {
            if policy.threshold > 0 && log.applied_since_snapshot >= policy.threshold {
                self.write_snapshot(&policy.path)?;
                log.applied_since_snapshot = 0;
            }
        }

        Ok(result)
    }

    async fn linearizable_read(&self, key: &str) -> Result<Option<String>> {
        // Applied state == committed state on a single voter, so the read
        // barrier holds without any round trip
        Ok(self.machine.lookup(key))
    }
}
