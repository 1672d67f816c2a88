use log::debug;

use consensus_core::chain::{BlockIndexEntry, BlockIndexView};
use consensus_core::config::ConsensusParams;
use consensus_core::constants::FULL_WINDOW_RETARGET_HEIGHT;
use ix_math::{decode_compact, encode_compact, U256, U512};

/// Compact target required for the block following the tip of `chain`.
///
/// `candidate_time` is the timestamp of the new block; it only matters on
/// networks that allow minimum-difficulty blocks. Panics if `chain` lacks an
/// ancestor the calculation needs.
pub fn get_next_work_required<V: BlockIndexView + ?Sized>(chain: &V, candidate_time: i64, params: &ConsensusParams) -> u32 {
    let pow_limit_bits = params.pow_limit_bits();

    // Genesis block
    let Some(tip) = chain.tip() else {
        return pow_limit_bits;
    };

    let height = tip.height + 1;
    let interval = params.difficulty_adjustment_interval(height);

    if i64::from(height) % interval != 0 {
        if !params.pow_allow_min_difficulty_blocks {
            return tip.bits;
        }

        // A block more than two spacings after its parent may use the minimum difficulty
        if candidate_time > tip.time + params.pow_target_spacing * 2 {
            return pow_limit_bits;
        }

        // Otherwise use the last block that was not mined under that rule
        let mut entry = tip;
        while entry.height > 0
            && i64::from(entry.height) % params.difficulty_adjustment_interval(entry.height) != 0
            && entry.bits == pow_limit_bits
        {
            entry = ancestor(chain, entry.height - 1);
        }
        debug!("Min-difficulty walk from {} stopped at {} with bits {:#010x}", tip.height, entry.height, entry.bits);
        return entry.bits;
    }

    // Past the full-window height every retarget except the first one spans
    // the whole interval
    let blocks_to_go_back =
        if height >= FULL_WINDOW_RETARGET_HEIGHT && i64::from(height) != interval { interval } else { interval - 1 };

    let first_height = i64::from(tip.height) - blocks_to_go_back;
    if first_height < 0 {
        panic!("retarget at height {height} reaches below genesis ({first_height})");
    }
    let first = ancestor(chain, first_height as u32);

    calculate_next_work_required(tip, first.time, params)
}

/// Retargets from `last`, the final block of a period whose first block has
/// timestamp `first_block_time`.
pub fn calculate_next_work_required(last: &BlockIndexEntry, first_block_time: i64, params: &ConsensusParams) -> u32 {
    if params.pow_no_retargeting {
        return last.bits;
    }

    let height = last.height + 1;
    let target_timespan = params.pow_target_timespan(height);
    let actual_timespan = limit_timespan(last.time - first_block_time, target_timespan, params.revised_retarget(height));

    let bits = retarget_bits(last.bits, actual_timespan, target_timespan, &params.pow_limit);
    debug!(
        "Retarget at height {height}: timespan {actual_timespan}s of {target_timespan}s, bits {:#010x} -> {bits:#010x}",
        last.bits
    );
    bits
}

/// Bounds the measured timespan of a period.
///
/// The classic rule clamps it to `[target / 4, target * 4]`. The revised rule
/// damps fast periods to 90%, 94% or 98% of `target` depending on how fast
/// they were, and only caps slow ones at `target * 4`.
pub fn limit_timespan(actual: i64, target: i64, revised: bool) -> i64 {
    if !revised {
        return actual.clamp(target / 4, target * 4);
    }

    let unit = target / 50;
    if actual < target {
        if actual < unit * 16 {
            unit * 45
        } else if actual < unit * 32 {
            unit * 47
        } else {
            unit * 49
        }
    } else {
        actual.min(target * 4)
    }
}

/// Scales the target of `bits` by `actual / target`, capped at `pow_limit`.
///
/// A timespan bounded down to zero yields a zero target, encoded as `0`.
pub fn retarget_bits(bits: u32, actual_timespan: i64, target_timespan: i64, pow_limit: &U256) -> u32 {
    assert!(target_timespan > 0, "target timespan must be positive, got {target_timespan}");

    let actual = actual_timespan.max(0) as u64;
    let current = decode_compact(bits).value;
    let scaled = current.full_mul(U256::from(actual)) / U512::from(target_timespan as u64);

    let new_target = if scaled > U512::from(*pow_limit) { *pow_limit } else { U256::try_from(scaled).unwrap_or(*pow_limit) };
    encode_compact(&new_target, false)
}

fn ancestor<V: BlockIndexView + ?Sized>(chain: &V, height: u32) -> &BlockIndexEntry {
    match chain.ancestor(height) {
        Some(entry) => entry,
        None => panic!("block index has no entry at height {height}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;

    #[test]
    fn classic_clamp() {
        let target = 14 * DAY;
        assert_eq!(limit_timespan(1, target, false), target / 4);
        assert_eq!(limit_timespan(target, target, false), target);
        assert_eq!(limit_timespan(target * 10, target, false), target * 4);
    }

    #[test]
    fn revised_tiers() {
        let unit = DAY / 50;
        assert_eq!(limit_timespan(0, DAY, true), unit * 45);
        assert_eq!(limit_timespan(unit * 16 - 1, DAY, true), unit * 45);
        assert_eq!(limit_timespan(unit * 16, DAY, true), unit * 47);
        assert_eq!(limit_timespan(unit * 32, DAY, true), unit * 49);
        assert_eq!(limit_timespan(DAY - 1, DAY, true), unit * 49);
        assert_eq!(limit_timespan(DAY, DAY, true), DAY);
        assert_eq!(limit_timespan(DAY * 3, DAY, true), DAY * 3);
        assert_eq!(limit_timespan(DAY * 5, DAY, true), DAY * 4);
    }

    #[test]
    fn retarget_is_capped_at_limit() {
        let limit = decode_compact(0x1d00_ffff).value;
        assert_eq!(retarget_bits(0x1d00_ffff, 4, 1, &limit), 0x1d00_ffff);
        assert_eq!(retarget_bits(0x1c0f_fff0, 1, 1, &limit), 0x1c0f_fff0);
    }

    #[test]
    fn zero_timespan_gives_zero_target() {
        let limit = decode_compact(0x1d00_ffff).value;
        assert_eq!(retarget_bits(0x1c0f_fff0, 0, DAY, &limit), 0);
        assert_eq!(retarget_bits(0x1c0f_fff0, -10, DAY, &limit), 0);
    }

    #[test]
    fn short_revised_timespan_does_not_panic() {
        // Below 50 seconds a fiftieth of the period rounds down to zero
        let params = ConsensusParams { pow_target_spacing: 10, pow_target_timespan_revised: 40, ..ConsensusParams::main() };
        let last = BlockIndexEntry::new(params.revised_retarget_height, 1_000, 0x1c0f_fff0);
        assert_eq!(limit_timespan(5, 40, true), 0);
        assert_eq!(calculate_next_work_required(&last, 995, &params), 0);
    }

    #[test]
    fn retarget_does_not_overflow() {
        // The product needs more than 256 bits
        let limit = U256::MAX;
        let bits = encode_compact(&(U256::MAX >> 8), false);
        assert_eq!(retarget_bits(bits, 1 << 40, 1 << 40, &limit), bits);
    }
}
