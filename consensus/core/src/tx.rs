//!
//! # Transaction
//!
//! The transaction structure as far as block construction and hashing need it.
//! Script evaluation and signature checks live outside this crate.
//!

use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::constants::SEQUENCE_FINAL;
use crate::encoding::{write_list, Encodable};
use crate::script::Script;
use crate::{Amount, Hash, ZERO_HASH};

/// A 32-byte transaction identifier.
pub type TransactionId = Hash;

/// Reference to an output of a previous transaction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub txid: TransactionId,
    pub index: u32,
}

impl OutPoint {
    pub fn new(txid: TransactionId, index: u32) -> Self {
        Self { txid, index }
    }

    /// The outpoint spent by a coinbase input
    pub fn null() -> Self {
        Self { txid: ZERO_HASH, index: u32::MAX }
    }

    pub fn is_null(&self) -> bool {
        self.txid.is_zero() && self.index == u32::MAX
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub previous_outpoint: OutPoint,
    pub signature_script: Script,
    pub sequence: u32,
}

impl TransactionInput {
    pub fn new(previous_outpoint: OutPoint, signature_script: Script, sequence: u32) -> Self {
        Self { previous_outpoint, signature_script, sequence }
    }

    /// Input of a coinbase transaction carrying `signature_script` as its payload
    pub fn coinbase(signature_script: Script) -> Self {
        Self::new(OutPoint::null(), signature_script, SEQUENCE_FINAL)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: Amount,
    pub script_public_key: Script,
}

impl TransactionOutput {
    pub fn new(value: Amount, script_public_key: Script) -> Self {
        Self { value, script_public_key }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

impl Transaction {
    pub fn new(version: i32, inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>, lock_time: u32) -> Self {
        Self { version, inputs, outputs, lock_time }
    }

    /// Double-SHA256 of the (witness-free) encoding
    pub fn id(&self) -> TransactionId {
        self.encoded_hash()
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_outpoint.is_null()
    }

    /// Sum of all output values
    pub fn total_output_value(&self) -> Amount {
        self.outputs.iter().map(|output| output.value).sum()
    }
}

impl Encodable for OutPoint {
    fn consensus_encode<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<usize> {
        Ok(self.txid.consensus_encode(writer)? + self.index.consensus_encode(writer)?)
    }
}

impl Encodable for TransactionInput {
    fn consensus_encode<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<usize> {
        let mut len = self.previous_outpoint.consensus_encode(writer)?;
        len += self.signature_script.consensus_encode(writer)?;
        len += self.sequence.consensus_encode(writer)?;
        Ok(len)
    }
}

impl Encodable for TransactionOutput {
    fn consensus_encode<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<usize> {
        Ok(self.value.consensus_encode(writer)? + self.script_public_key.consensus_encode(writer)?)
    }
}

impl Encodable for Transaction {
    fn consensus_encode<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<usize> {
        let mut len = self.version.consensus_encode(writer)?;
        len += write_list(writer, &self.inputs)?;
        len += write_list(writer, &self.outputs)?;
        len += self.lock_time.consensus_encode(writer)?;
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Opcode;

    fn coinbase_tx() -> Transaction {
        let input = TransactionInput::coinbase(Script::new().push_int(486_604_799).push_num(4));
        let output = TransactionOutput::new(50, Script::new().push_opcode(Opcode::OP_CHECKSIG));
        Transaction::new(1, vec![input], vec![output], 0)
    }

    #[test]
    fn null_outpoint() {
        assert!(OutPoint::null().is_null());
        assert!(!OutPoint::new(ZERO_HASH, 0).is_null());
    }

    #[test]
    fn coinbase_detection() {
        let tx = coinbase_tx();
        assert!(tx.is_coinbase());

        let mut spend = tx.clone();
        spend.inputs[0].previous_outpoint = OutPoint::new(tx.id(), 0);
        assert!(!spend.is_coinbase());
    }

    #[test]
    fn encoding_layout() {
        let tx = coinbase_tx();
        let bytes = tx.encoded();
        // version
        assert_eq!(&bytes[..4], &[1, 0, 0, 0]);
        // one input spending the null outpoint
        assert_eq!(bytes[4], 1);
        assert_eq!(&bytes[5..37], &[0u8; 32]);
        assert_eq!(&bytes[37..41], &[0xff; 4]);
        // script: 04 ffff001d 01 04
        assert_eq!(&bytes[41..49], &[7, 0x04, 0xff, 0xff, 0x00, 0x1d, 0x01, 0x04]);
        assert_eq!(&bytes[49..53], &[0xff; 4]);
        // one output: value, script, then lock time
        assert_eq!(bytes[53], 1);
        assert_eq!(&bytes[54..62], &50i64.to_le_bytes());
        assert_eq!(&bytes[62..64], &[1, 0xac]);
        assert_eq!(&bytes[64..], &[0, 0, 0, 0]);
        assert_eq!(tx.id(), ix_hashes::double_sha256(&bytes));
    }
}
