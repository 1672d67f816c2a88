use crate::{hasher::double_sha256, Hash, ZERO_HASH};

/// Hashes two child nodes into their parent: sha256d(left || right).
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(left.as_bytes());
    buf[32..].copy_from_slice(right.as_bytes());
    double_sha256(&buf)
}

/// Computes the merkle root of a list of leaf hashes.
///
/// Levels with an odd number of nodes pair the last node with itself. A single
/// leaf is its own root and an empty list yields the null hash.
pub fn merkle_root(leaves: &[Hash]) -> Hash {
    merkle_root_with_mutation(leaves).0
}

/// Same as [`merkle_root`], also reporting whether two identical siblings were
/// hashed together at any level (the CVE-2012-2459 duplicate-transactions
/// ambiguity a block validator must reject).
pub fn merkle_root_with_mutation(leaves: &[Hash]) -> (Hash, bool) {
    if leaves.is_empty() {
        return (ZERO_HASH, false);
    }

    let mut mutated = false;
    let mut level = leaves.to_vec();
    while level.len() > 1 {
        let mut next_level = Vec::with_capacity((level.len() + 1) / 2);
        for chunk in level.chunks(2) {
            match chunk {
                [left, right] => {
                    if left == right {
                        mutated = true;
                    }
                    next_level.push(hash_pair(left, right));
                }
                [single] => next_level.push(hash_pair(single, single)),
                _ => unreachable!(),
            }
        }
        level = next_level;
    }
    (level[0], mutated)
}
