use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::auxpow::AuxpowParams;
use crate::constants::{MAX_DEPLOYMENT_BIT, SECONDS_PER_DAY};
use crate::errors::ParamsError;
use crate::{Hash, ZERO_HASH};
use ix_math::encode_compact;

/// Soft-fork deployments signalled through version bits
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentPos {
    TestDummy,
    /// BIP68, BIP112 and BIP113
    Csv,
    /// BIP141 and BIP143
    Segwit,
}

/// Number of version-bits deployments
pub const MAX_VERSION_BITS_DEPLOYMENTS: usize = 3;

impl DeploymentPos {
    pub const ALL: [DeploymentPos; MAX_VERSION_BITS_DEPLOYMENTS] = [DeploymentPos::TestDummy, DeploymentPos::Csv, DeploymentPos::Segwit];

    pub fn name(&self) -> &'static str {
        match self {
            DeploymentPos::TestDummy => "testdummy",
            DeploymentPos::Csv => "csv",
            DeploymentPos::Segwit => "segwit",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DeploymentPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeploymentPos {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeploymentPos::ALL.into_iter().find(|pos| pos.name() == s).ok_or_else(|| ParamsError::UnknownDeployment(s.to_string()))
    }
}

/// Version-bits parameters of one deployment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Bit position in the block version used for signalling
    pub bit: u8,
    /// Median time past from which signalling counts
    pub start_time: i64,
    /// Median time past after which the deployment fails if not locked in
    pub timeout: i64,
}

impl Deployment {
    pub const fn new(bit: u8, start_time: i64, timeout: i64) -> Self {
        assert!(bit <= MAX_DEPLOYMENT_BIT);
        Self { bit, start_time, timeout }
    }

    /// Version mask a block sets to signal for this deployment
    pub fn mask(&self) -> u32 {
        1u32 << self.bit
    }
}

/// Consensus parameters of one network.
///
/// Immutable once built, except the regtest deployments which test harnesses
/// may override through the registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsensusParams {
    pub hash_genesis_block: Hash,
    pub subsidy_halving_interval: u32,

    /// Block height and hash at which BIP34 becomes active
    pub bip34_height: u32,
    pub bip34_hash: Hash,
    /// Block height at which BIP65 becomes active
    pub bip65_height: u32,
    /// Block height at which BIP66 becomes active
    pub bip66_height: u32,

    /// Minimum blocks including miner confirmation of the total of
    /// `miner_confirmation_window` blocks in a retargeting period
    /// (`pow_target_timespan / pow_target_spacing`), used for BIP9 deployments.
    pub rule_change_activation_threshold: u32,
    pub miner_confirmation_window: u32,
    pub deployments: [Deployment; MAX_VERSION_BITS_DEPLOYMENTS],

    /// Easiest allowed target
    pub pow_limit: U256,
    pub pow_allow_min_difficulty_blocks: bool,
    pub pow_no_retargeting: bool,
    /// Target seconds between blocks
    pub pow_target_spacing: i64,
    /// Target seconds per retarget period below `revised_retarget_height`
    pub pow_target_timespan_legacy: i64,
    /// Target seconds per retarget period from `revised_retarget_height` on
    pub pow_target_timespan_revised: i64,
    /// Height switching to the shortened period and the damped retarget rule
    pub revised_retarget_height: u32,

    pub auxpow: AuxpowParams,
}

impl ConsensusParams {
    pub fn pow_target_timespan(&self, height: u32) -> i64 {
        if self.revised_retarget(height) {
            self.pow_target_timespan_revised
        } else {
            self.pow_target_timespan_legacy
        }
    }

    /// Number of blocks between scheduled retargets at `height`
    pub fn difficulty_adjustment_interval(&self, height: u32) -> i64 {
        self.pow_target_timespan(height) / self.pow_target_spacing
    }

    /// Whether the damped retarget formula applies to the block at `height`
    pub fn revised_retarget(&self, height: u32) -> bool {
        height >= self.revised_retarget_height
    }

    /// Compact encoding of `pow_limit`, the target of a minimum-difficulty block
    pub fn pow_limit_bits(&self) -> u32 {
        encode_compact(&self.pow_limit, false)
    }

    pub fn deployment(&self, pos: DeploymentPos) -> &Deployment {
        &self.deployments[pos.index()]
    }

    pub(crate) fn deployment_mut(&mut self, pos: DeploymentPos) -> &mut Deployment {
        &mut self.deployments[pos.index()]
    }

    pub fn allow_legacy_blocks(&self, height: u32) -> bool {
        self.auxpow.allow_legacy_blocks(height)
    }

    pub fn allow_auxpow_blocks(&self, height: u32) -> bool {
        self.auxpow.allow_auxpow_blocks(height)
    }

    fn base() -> Self {
        Self {
            hash_genesis_block: ZERO_HASH,
            subsidy_halving_interval: 210_000,
            bip34_height: 0,
            bip34_hash: ZERO_HASH,
            bip65_height: 0,
            bip66_height: 0,
            rule_change_activation_threshold: 1916,
            miner_confirmation_window: 2016,
            deployments: [
                // January 1, 2008 to December 31, 2008
                Deployment::new(28, 1_199_145_601, 1_230_767_999),
                Deployment::new(0, 0, 0),
                Deployment::new(1, 0, 0),
            ],
            pow_limit: pow_limit_from_hex("00000000ffffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
            pow_allow_min_difficulty_blocks: false,
            pow_no_retargeting: false,
            pow_target_spacing: 10 * 60,
            pow_target_timespan_legacy: 14 * SECONDS_PER_DAY,
            pow_target_timespan_revised: SECONDS_PER_DAY,
            revised_retarget_height: REVISED_RETARGET_HEIGHT,
            auxpow: AuxpowParams { chain_id: 0x0001, start_height: 0, strict_chain_id: true, legacy_blocks_before: Some(0) },
        }
    }

    /// Main network consensus rules. `hash_genesis_block` is filled in by the
    /// network parameter builder.
    pub fn main() -> Self {
        Self {
            // BIP34/65/66 are not scheduled on main yet
            bip34_height: 1_000_000,
            bip34_hash: hash_literal("000000000000024b89b42a942fe0d9fea3bb44ab7bd1b19115dd6a759c0808b8"),
            bip65_height: 1_000_000,
            bip66_height: 1_000_000,
            auxpow: AuxpowParams { chain_id: 0x0003, start_height: 45_000, strict_chain_id: true, legacy_blocks_before: Some(45_000) },
            ..Self::base()
        }
    }

    pub fn testnet() -> Self {
        let mut params = Self {
            bip34_height: 21_111,
            bip34_hash: hash_literal("0000000023b3a96d3484e5abb3755c413e7d41500f8e2a5c3f0dd01299cd8ef8"),
            bip65_height: 581_885,
            bip66_height: 330_776,
            pow_allow_min_difficulty_blocks: true,
            // 75% for test chains
            rule_change_activation_threshold: 1512,
            auxpow: AuxpowParams { chain_id: 0x0001, start_height: 0, strict_chain_id: false, legacy_blocks_before: None },
            ..Self::base()
        };
        // March 1st, 2016 to May 1st, 2017
        *params.deployment_mut(DeploymentPos::Csv) = Deployment::new(0, 1_456_790_400, 1_493_596_800);
        params
    }

    pub fn regtest() -> Self {
        Self {
            subsidy_halving_interval: 150,
            // BIP34 never activates so version 1 blocks stay valid in tests
            bip34_height: 100_000_000,
            bip34_hash: ZERO_HASH,
            bip65_height: 1351,
            bip66_height: 1251,
            pow_limit: pow_limit_from_hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
            pow_allow_min_difficulty_blocks: true,
            pow_no_retargeting: true,
            rule_change_activation_threshold: 108,
            miner_confirmation_window: 144,
            deployments: [
                Deployment::new(28, 0, REGTEST_DEPLOYMENT_TIMEOUT),
                Deployment::new(0, 0, REGTEST_DEPLOYMENT_TIMEOUT),
                Deployment::new(1, 0, REGTEST_DEPLOYMENT_TIMEOUT),
            ],
            auxpow: AuxpowParams { chain_id: 0x0001, start_height: 0, strict_chain_id: true, legacy_blocks_before: Some(0) },
            ..Self::base()
        }
    }
}

/// Height from which the shortened retarget period and the damped retarget
/// formula apply
pub const REVISED_RETARGET_HEIGHT: u32 = 20_055;

/// Regtest deployments never time out in practice
pub const REGTEST_DEPLOYMENT_TIMEOUT: i64 = 999_999_999_999;

fn pow_limit_from_hex(s: &'static str) -> U256 {
    U256::from_str_radix(s, 16).unwrap_or_else(|_| panic!("invalid proof-of-work limit literal {s}"))
}

pub(crate) fn hash_literal(s: &'static str) -> Hash {
    Hash::from_hex(s).unwrap_or_else(|e| panic!("invalid hash literal {s}: {e}"))
}
