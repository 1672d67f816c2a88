//! Read-only view over the block index that difficulty calculations walk.
//!
//! Entries are addressed by height, so "ancestor at height" is a direct lookup
//! rather than a walk over parent links. A view always describes one chain:
//! the tip and every ancestor down to genesis.

use crate::header::Header;
use serde::{Deserialize, Serialize};

/// The fields of a block index entry the difficulty code reads
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockIndexEntry {
    pub height: u32,
    /// Block timestamp in seconds
    pub time: i64,
    /// Compact target of the block
    pub bits: u32,
}

impl BlockIndexEntry {
    pub fn new(height: u32, time: i64, bits: u32) -> Self {
        Self { height, time, bits }
    }
}

pub trait BlockIndexView {
    /// The last block of the chain, `None` when the chain is empty
    fn tip(&self) -> Option<&BlockIndexEntry>;

    /// The ancestor of the tip at `height`, `None` above the tip
    fn ancestor(&self, height: u32) -> Option<&BlockIndexEntry>;
}

/// Entries stored so that `entries[h].height == h`
impl BlockIndexView for [BlockIndexEntry] {
    fn tip(&self) -> Option<&BlockIndexEntry> {
        self.last()
    }

    fn ancestor(&self, height: u32) -> Option<&BlockIndexEntry> {
        self.get(height as usize).filter(|entry| entry.height == height)
    }
}

/// A chain of index entries kept in a vector indexed by height.
#[derive(Clone, Debug, Default)]
pub struct HeaderChain {
    entries: Vec<BlockIndexEntry>,
}

impl HeaderChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a block on top of the current tip
    pub fn push(&mut self, time: i64, bits: u32) -> &BlockIndexEntry {
        let height = self.entries.len() as u32;
        self.entries.push(BlockIndexEntry::new(height, time, bits));
        &self.entries[height as usize]
    }

    pub fn push_header(&mut self, header: &Header) -> &BlockIndexEntry {
        self.push(header.block_time(), header.bits)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[BlockIndexEntry] {
        &self.entries
    }

    /// The chain as it looked when the block at `height` was the tip
    pub fn view_at(&self, height: u32) -> &[BlockIndexEntry] {
        let end = (height as usize + 1).min(self.entries.len());
        &self.entries[..end]
    }

    /// Drops every block above `height`
    pub fn truncate(&mut self, height: u32) {
        self.entries.truncate(height as usize + 1);
    }
}

impl BlockIndexView for HeaderChain {
    fn tip(&self) -> Option<&BlockIndexEntry> {
        self.entries.as_slice().tip()
    }

    fn ancestor(&self, height: u32) -> Option<&BlockIndexEntry> {
        self.entries.as_slice().ancestor(height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(len: u32) -> HeaderChain {
        let mut chain = HeaderChain::new();
        for i in 0..len {
            chain.push(1_000 + i64::from(i) * 600, 0x1d00_ffff);
        }
        chain
    }

    #[test]
    fn empty_chain_has_no_tip() {
        let chain = HeaderChain::new();
        assert!(chain.tip().is_none());
        assert!(chain.ancestor(0).is_none());
    }

    #[test]
    fn heights_follow_insertion_order() {
        let chain = chain(10);
        assert_eq!(chain.tip().unwrap().height, 9);
        assert_eq!(chain.ancestor(3).unwrap().time, 1_000 + 3 * 600);
        assert!(chain.ancestor(10).is_none());
    }

    #[test]
    fn views_end_at_requested_height() {
        let chain = chain(10);
        let view = chain.view_at(4);
        assert_eq!(view.tip().unwrap().height, 4);
        assert!(view.ancestor(5).is_none());
        assert_eq!(chain.view_at(50).tip().unwrap().height, 9);
    }

    #[test]
    fn sparse_slice_has_no_ancestors() {
        // Not stored from genesis, so positions and heights disagree
        let entries = [BlockIndexEntry::new(100, 0, 0x1d00_ffff), BlockIndexEntry::new(101, 600, 0x1d00_ffff)];
        let view = &entries[..];
        assert_eq!(view.tip().unwrap().height, 101);
        assert!(view.ancestor(0).is_none());
        assert!(view.ancestor(1).is_none());
        assert!(view.ancestor(100).is_none());
    }

    #[test]
    fn truncate_keeps_requested_tip() {
        let mut chain = chain(10);
        chain.truncate(6);
        assert_eq!(chain.len(), 7);
        assert_eq!(chain.tip().unwrap().height, 6);
    }
}
