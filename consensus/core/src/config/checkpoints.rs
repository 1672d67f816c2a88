use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::SECONDS_PER_DAY;
use crate::Hash;

/// Transaction statistics at the last checkpoint, used to estimate how far a
/// syncing node has progressed
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainTxData {
    /// UNIX timestamp of the last checkpoint block
    pub time: i64,
    /// Total number of transactions between genesis and the last checkpoint
    pub tx_count: u64,
    /// Estimated number of transactions per day after the checkpoint
    pub tx_per_day: f64,
}

/// Known-good blocks of a network
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointData {
    pub checkpoints: BTreeMap<u32, Hash>,
    pub chain_tx: ChainTxData,
}

impl CheckpointData {
    pub fn new(checkpoints: impl IntoIterator<Item = (u32, Hash)>, chain_tx: ChainTxData) -> Self {
        Self { checkpoints: checkpoints.into_iter().collect(), chain_tx }
    }

    pub fn get(&self, height: u32) -> Option<&Hash> {
        self.checkpoints.get(&height)
    }

    /// False only if a checkpoint pins `height` to a different hash
    pub fn check_block(&self, height: u32, hash: &Hash) -> bool {
        self.checkpoints.get(&height).map_or(true, |expected| expected == hash)
    }

    pub fn last_checkpoint_height(&self) -> Option<u32> {
        self.checkpoints.keys().next_back().copied()
    }

    /// Rough fraction of all transactions processed, in `[0, 1]`.
    ///
    /// `chain_tx` is the number of transactions up to and including the tip,
    /// `tip_time` its timestamp and `now` the current time.
    pub fn guess_verification_progress(&self, chain_tx: u64, tip_time: i64, now: i64) -> f64 {
        if chain_tx == 0 {
            return 0.0;
        }

        let tx_per_second = self.chain_tx.tx_per_day / SECONDS_PER_DAY as f64;
        let expected_total = if chain_tx <= self.chain_tx.tx_count {
            self.chain_tx.tx_count as f64 + (now - self.chain_tx.time).max(0) as f64 * tx_per_second
        } else {
            chain_tx as f64 + (now - tip_time).max(0) as f64 * tx_per_second
        };

        (chain_tx as f64 / expected_total).min(1.0)
    }
}
