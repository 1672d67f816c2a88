//! Merge-mining identity parameters and the version-field layout they refer to.
//!
//! The auxiliary proof-of-work validator itself lives outside this crate. It
//! reads the values below to decide whether a header may (or must) carry a
//! proof of work performed on a parent chain.

use serde::{Deserialize, Serialize};

/// Version bit flagging a header that carries an auxiliary proof of work
pub const VERSION_AUXPOW: i32 = 1 << 8;

/// The chain id occupies the version bits from here upwards
pub const VERSION_CHAIN_START: i32 = 1 << 16;

/// Per-network merge-mining parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuxpowParams {
    /// Identity tag of this chain inside a parent chain's merge-mining commitment
    pub chain_id: i32,
    /// First height at which merge-mined headers are accepted
    pub start_height: u32,
    /// Reject non-legacy headers whose version carries a foreign chain id
    pub strict_chain_id: bool,
    /// Legacy (non merge-mined) headers are valid below this height. `None`
    /// keeps them valid forever, `Some(0)` never allows them.
    pub legacy_blocks_before: Option<u32>,
}

impl AuxpowParams {
    pub fn allow_legacy_blocks(&self, height: u32) -> bool {
        match self.legacy_blocks_before {
            None => true,
            Some(before) => height < before,
        }
    }

    pub fn allow_auxpow_blocks(&self, height: u32) -> bool {
        height >= self.start_height
    }

    /// Whether a header version's chain id is acceptable for this network
    pub fn accepts_chain_id(&self, version: BlockVersion) -> bool {
        !self.strict_chain_id || version.is_legacy() || version.chain_id() == self.chain_id
    }
}

/// Decoded view of a header's version field.
///
/// Layout: bits 0..8 base version, bit 8 auxpow flag, bits 16.. chain id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockVersion(i32);

impl BlockVersion {
    pub const fn new(version: i32) -> Self {
        Self(version)
    }

    /// Composes a version from its parts
    pub fn from_parts(base_version: i32, chain_id: i32, auxpow: bool) -> Self {
        let mut version = base_version % VERSION_AUXPOW + chain_id * VERSION_CHAIN_START;
        if auxpow {
            version |= VERSION_AUXPOW;
        }
        Self(version)
    }

    pub fn raw(&self) -> i32 {
        self.0
    }

    pub fn base_version(&self) -> i32 {
        self.0 % VERSION_AUXPOW
    }

    pub fn chain_id(&self) -> i32 {
        self.0 >> 16
    }

    pub fn is_auxpow(&self) -> bool {
        self.0 & VERSION_AUXPOW != 0
    }

    /// Headers from before merge mining existed: plain version 1, or version 2
    /// without a chain id
    pub fn is_legacy(&self) -> bool {
        self.0 == 1 || (self.0 == 2 && self.chain_id() == 0)
    }
}

impl From<i32> for BlockVersion {
    fn from(version: i32) -> Self {
        Self(version)
    }
}
