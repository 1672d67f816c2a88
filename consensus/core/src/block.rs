use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::encoding::{write_list, Encodable};
use crate::header::Header;
use crate::tx::Transaction;
use crate::Hash;
use ix_hashes::merkle::merkle_root_with_mutation;

/// Complete block structure including header and transactions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub header: Header,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(header: Header, transactions: Vec<Transaction>) -> Self {
        Self { header, transactions }
    }

    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    /// Merkle root over the transaction ids
    pub fn compute_merkle_root(&self) -> Hash {
        self.compute_merkle_root_with_mutation().0
    }

    /// Merkle root plus whether the transaction list hashes like a list with
    /// duplicated entries
    pub fn compute_merkle_root_with_mutation(&self) -> (Hash, bool) {
        let ids: Vec<Hash> = self.transactions.iter().map(Transaction::id).collect();
        merkle_root_with_mutation(&ids)
    }

    /// Whether the header commits to the carried transactions
    pub fn has_valid_merkle_root(&self) -> bool {
        let (root, mutated) = self.compute_merkle_root_with_mutation();
        !mutated && root == self.header.hash_merkle_root
    }
}

impl Encodable for Block {
    fn consensus_encode<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<usize> {
        Ok(self.header.consensus_encode(writer)? + write_list(writer, &self.transactions)?)
    }
}
