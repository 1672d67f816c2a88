use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::auxpow::BlockVersion;
use crate::encoding::Encodable;
use crate::{Hash, ZERO_HASH};

/// Size of an encoded header in bytes
pub const HEADER_SIZE: usize = 80;

/// Block header
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Version field, also carrying the merge-mining chain id and flag
    pub version: i32,
    /// Hash of the previous block, null for a genesis block
    pub hash_prev_block: Hash,
    pub hash_merkle_root: Hash,
    /// Block timestamp in seconds since the epoch
    pub time: u32,
    /// Compact encoding of the target this header claims
    pub bits: u32,
    pub nonce: u32,
}

impl Header {
    pub fn new(version: i32, hash_prev_block: Hash, hash_merkle_root: Hash, time: u32, bits: u32, nonce: u32) -> Self {
        Self { version, hash_prev_block, hash_merkle_root, time, bits, nonce }
    }

    /// Double-SHA256 of the 80-byte encoding
    pub fn hash(&self) -> Hash {
        self.encoded_hash()
    }

    pub fn block_time(&self) -> i64 {
        i64::from(self.time)
    }

    pub fn is_genesis(&self) -> bool {
        self.hash_prev_block == ZERO_HASH
    }

    /// Interpretation of the version field for merge mining
    pub fn block_version(&self) -> BlockVersion {
        BlockVersion::new(self.version)
    }
}

impl Encodable for Header {
    fn consensus_encode<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<usize> {
        let mut len = self.version.consensus_encode(writer)?;
        len += self.hash_prev_block.consensus_encode(writer)?;
        len += self.hash_merkle_root.consensus_encode(writer)?;
        len += self.time.consensus_encode(writer)?;
        len += self.bits.consensus_encode(writer)?;
        len += self.nonce.consensus_encode(writer)?;
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_header_is_80_bytes() {
        let header = Header::new(1, ZERO_HASH, Hash::from_bytes([7u8; 32]), 1_304_113_447, 0x1d00_ffff, 2_245_271_137);
        let bytes = header.encoded();
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(&bytes[68..72], &1_304_113_447u32.to_le_bytes());
        assert_eq!(&bytes[72..76], &0x1d00_ffffu32.to_le_bytes());
        assert_eq!(&bytes[76..80], &2_245_271_137u32.to_le_bytes());
        assert!(header.is_genesis());
    }

    #[test]
    fn nonce_changes_hash() {
        let mut header = Header::new(1, ZERO_HASH, ZERO_HASH, 0, 0x207f_ffff, 0);
        let before = header.hash();
        header.nonce += 1;
        assert_ne!(before, header.hash());
    }
}
