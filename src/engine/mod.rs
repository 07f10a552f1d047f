//! Consensus engine seam
//!
//! The engine that orders, replicates, and commits commands is an external
//! collaborator. The core talks to it only through the [`ConsensusEngine`]
//! trait; [`LocalEngine`] is the single-voter implementation used for
//! single-node deployments and for tests.

pub mod local;
pub mod traits;

pub use local::LocalEngine;
pub use traits::ConsensusEngine;
