use crate::Amount;

/// Number of base units in one coin
pub const COIN: Amount = 100_000_000;

/// Upper bound on any single amount
pub const MAX_MONEY: Amount = 21_000_000 * COIN;

/// Block reward paid by every genesis block
pub const GENESIS_REWARD: Amount = 50 * COIN;

/// Sequence number of a final transaction input
pub const SEQUENCE_FINAL: u32 = 0xffff_ffff;

/// Block height from which the retarget window spans the full interval instead
/// of one block less (the time-warp fix carried over from Litecoin).
pub const FULL_WINDOW_RETARGET_HEIGHT: u32 = 43_000;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Highest version bit a soft-fork deployment may signal on
pub const MAX_DEPLOYMENT_BIT: u8 = 28;
