//! Difficulty retargeting and proof-of-work checks.
//!
//! Both operate on compact targets and a read-only [`BlockIndexView`] of the
//! chain, and never mutate it.
//!
//! [`BlockIndexView`]: consensus_core::chain::BlockIndexView

pub mod check;
pub mod retarget;

pub use check::{block_proof, check_header_proof_of_work, check_proof_of_work};
pub use retarget::{calculate_next_work_required, get_next_work_required};
