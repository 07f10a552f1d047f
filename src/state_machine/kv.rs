//! Replicated key-value state
//!
//! The mapping is mutated only by applying committed commands in commit
//! order. At any fixed log index the state is a pure function of the ordered
//! command prefix, so every replica that applied the same prefix holds an
//! identical mapping.
//!
//! Locking discipline: one `RwLock` over the whole map. Lookups share the
//! lock, apply and restore take it exclusively, and snapshotting holds the
//! read side so it serializes a consistent view that excludes the applier.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::sync::RwLock;

use crate::command::Command;
use crate::error::{Result, StoreError};
use super::{ApplyResult, Snapshotable, StateMachine};

/// In-memory key-value mapping replicated through the consensus engine.
///
/// Absence of a key is distinct from presence with an empty value. The
/// snapshot byte format is the plain JSON encoding of the map, kept stable
/// so snapshots written by prior versions keep restoring.
#[derive(Debug, Default)]
pub struct KvStore {
    data: RwLock<HashMap<String, String>>,
}

impl KvStore {
    /// Create an empty store.
    pub fn new() -> Self {
        KvStore {
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a value. Safe to call concurrently with other lookups.
    pub fn get(&self, key: &str) -> Option<String> {
        self.data.read().unwrap().get(key).cloned()
    }

    /// Number of keys currently present.
    pub fn len(&self) -> usize {
        self.data.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().unwrap().is_empty()
    }

    /// Total overwrite of the slot for `key`. Only the apply gateway calls
    /// this; external writers go through the consensus engine.
    fn set(&self, key: String, value: String) {
        self.data.write().unwrap().insert(key, value);
    }
}

impl StateMachine for KvStore {
    fn apply(&self, payload: &[u8], index: u64) -> Result<ApplyResult> {
        let command = Command::decode(payload)?;
        match command {
            Command::Set { key, value } => self.set(key, value),
        }
        Ok(ApplyResult { index })
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key)
    }
}

impl Snapshotable for KvStore {
    fn save_snapshot(&self, w: &mut dyn Write) -> Result<()> {
        let data = self.data.read().unwrap();
        serde_json::to_writer(w, &*data).map_err(|e| StoreError::SnapshotIo(e.into()))
    }

    fn recover_from_snapshot(&self, r: &mut dyn Read) -> Result<()> {
        // Decode fully before touching the live map, so a corrupt stream
        // cannot leave a partial restore behind.
        let restored: HashMap<String, String> = serde_json::from_reader(r).map_err(|e| {
            if e.is_io() {
                StoreError::SnapshotIo(e.into())
            } else {
                StoreError::CorruptSnapshot(e.to_string())
            }
        })?;
        *self.data.write().unwrap() = restored;
        Ok(())
    }
}
