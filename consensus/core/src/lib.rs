//! Consensus data types and per-network consensus parameters.
//!
//! Holds the block primitives needed to build a genesis block, the parameter
//! sets of the main, test and regtest networks, the registry that selects one
//! of them at startup, and the read-only chain view the difficulty code walks.

pub mod auxpow;
pub mod block;
pub mod chain;
pub mod config;
pub mod constants;
pub mod encoding;
pub mod errors;
pub mod header;
pub mod network;
pub mod script;
pub mod tx;

pub use ix_hashes::{Hash, ZERO_HASH};

/// Monetary amount in base units
pub type Amount = i64;
