//! State machine layer
//!
//! - `KvStore`: the replicated key-value mapping
//! - `StateMachine` / `Snapshotable`: the apply and snapshot gateways the
//!   consensus engine drives

pub mod kv;
pub mod traits;

pub use kv::KvStore;
pub use traits::{ApplyResult, Snapshotable, StateMachine};
