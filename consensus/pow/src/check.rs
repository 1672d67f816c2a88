use log::trace;

use consensus_core::config::ConsensusParams;
use consensus_core::header::Header;
use ix_hashes::Hash;
use ix_math::{decode_compact, u256_from_le_bytes, U256};

/// Whether `hash` satisfies the compact target `bits`.
///
/// Fails for targets that are negative, zero, overflowing or easier than the
/// network's proof-of-work limit.
pub fn check_proof_of_work(hash: &Hash, bits: u32, params: &ConsensusParams) -> bool {
    let target = decode_compact(bits);
    if !target.is_in_range(&params.pow_limit) {
        trace!("Rejecting bits {bits:#010x}: target out of range");
        return false;
    }

    if u256_from_le_bytes(hash.as_bytes()) > target.value {
        trace!("Hash {hash} does not meet target of bits {bits:#010x}");
        return false;
    }
    true
}

/// Checks the header's own hash against its claimed bits
pub fn check_header_proof_of_work(header: &Header, params: &ConsensusParams) -> bool {
    check_proof_of_work(&header.hash(), header.bits, params)
}

/// Expected number of hashes needed to meet the target of `bits`, zero for
/// targets that cannot be met.
pub fn block_proof(bits: u32) -> U256 {
    let target = decode_compact(bits);
    if target.negative || target.overflow || target.value.is_zero() {
        return U256::zero();
    }
    // 2**256 / (target + 1) without leaving 256 bits, since 2**256 does not fit
    (!target.value / (target.value + U256::one())) + U256::one()
}
