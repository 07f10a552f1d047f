//! Wire codec for replicated write commands
//!
//! A command is the unit of consensus: it is assigned exactly one position in
//! the replication log and applied exactly once, in that order, on every
//! replica. The JSON wire shape is externally tagged, e.g.
//! `{"Set":{"key":"foo","value":"bar"}}`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// A state-changing operation replicated through the consensus engine.
///
/// The set of kinds is closed: payloads with an unrecognized tag (or any
/// other shape) are rejected with [`StoreError::Decode`] rather than being
/// silently ignored. Commands are immutable once submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Unconditionally write `value` at `key`, overwriting any prior value.
    Set { key: String, value: String },
}

impl Command {
    /// Decode a command from its wire bytes.
    ///
    /// Pure and stateless; malformed input fails with [`StoreError::Decode`].
    pub fn decode(bytes: &[u8]) -> Result<Command> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// Encode a command to its wire bytes. Inverse of [`Command::decode`].
    pub fn encode(&self) -> Vec<u8> {
        // Serializing an enum of owned strings cannot fail
        serde_json::to_vec(self).expect("command serialization is infallible")
    }
}
