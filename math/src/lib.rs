//! 256-bit arithmetic helpers shared by the consensus crates.
//!
//! Targets are plain [`U256`] values; this crate adds the compact ("nBits")
//! encoding used by block headers and the conversion from a hash digest to the
//! number it represents.

pub mod compact;

pub use compact::{decode_compact, encode_compact, CompactTarget};
pub use primitive_types::{U256, U512};

/// Interprets a 32-byte digest as an unsigned integer.
///
/// Digests are stored least significant byte first, the same order the target
/// is compared in.
pub fn u256_from_le_bytes(bytes: &[u8; 32]) -> U256 {
    U256::from_little_endian(bytes)
}

/// Inverse of [`u256_from_le_bytes`].
pub fn u256_to_le_bytes(value: &U256) -> [u8; 32] {
    let mut out = [0u8; 32];
    value.to_little_endian(&mut out);
    out
}
