//! Strongly-consistent replicated key-value store core.
//!
//! This crate is the deterministic state machine and client contract of a
//! leader-replicated KV store: committed `Set` commands are applied in log
//! order to an in-memory map, the whole map can be captured and restored as
//! a snapshot, and an HTTP layer exposes propose-and-wait writes and
//! linearizable reads. The consensus engine itself (election, replication,
//! quorum) sits behind the [`engine::ConsensusEngine`] trait.

pub mod api;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod state_machine;

/// Testing utilities for integration tests.
pub mod testing;

pub use error::{Result, StoreError};
