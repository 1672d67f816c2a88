use hex_literal::hex;

use crate::block::Block;
use crate::constants::GENESIS_REWARD;
use crate::errors::GenesisError;
use crate::header::Header;
use crate::script::{Opcode, Script};
use crate::tx::{Transaction, TransactionInput, TransactionOutput};
use crate::{Amount, Hash, ZERO_HASH};

/// Headline committed to by the genesis coinbase
pub const GENESIS_TIMESTAMP: &str = "To see the farm is to leave it";

/// Public key paid by the genesis coinbase output
pub const GENESIS_OUTPUT_PUBKEY: [u8; 65] = hex!(
    "04678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb6"
    "49f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11984"
);

/// Compact target pushed first in the genesis coinbase script
const GENESIS_COINBASE_BITS: i64 = 486_604_799;

/// The header fields that differ between the genesis blocks of each network
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenesisBlock {
    pub time: u32,
    pub nonce: u32,
    pub bits: u32,
    pub version: i32,
    pub reward: Amount,
}

/// The literal identity a constructed genesis block must reproduce
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenesisConstants {
    pub hash: &'static str,
    pub hash_merkle_root: &'static str,
}

pub const MAIN_GENESIS: GenesisBlock =
    GenesisBlock { time: 1_304_113_447, nonce: 2_245_271_137, bits: 0x1d00_ffff, version: 1, reward: GENESIS_REWARD };

pub const MAIN_GENESIS_CONSTANTS: GenesisConstants = GenesisConstants {
    hash: "0000000001534ef8893b025b9c1da67250285e35c9f76cae36a4904fdf72c591",
    hash_merkle_root: "cb3ae7b867c97ceb834c5d131355cd4bc176a44360fede9ed6d47b897397ba3f",
};

pub const TESTNET_GENESIS: GenesisBlock =
    GenesisBlock { time: 1_296_688_602, nonce: 414_098_458, bits: 0x1d00_ffff, version: 1, reward: GENESIS_REWARD };

pub const REGTEST_GENESIS: GenesisBlock =
    GenesisBlock { time: 1_296_688_602, nonce: 2, bits: 0x207f_ffff, version: 1, reward: GENESIS_REWARD };

impl GenesisBlock {
    /// Builds the genesis block paying the standard coinbase output
    pub fn build(&self) -> Block {
        let output_script = Script::new().push_slice(&GENESIS_OUTPUT_PUBKEY).push_opcode(Opcode::OP_CHECKSIG);
        create_genesis_block(GENESIS_TIMESTAMP, output_script, self.time, self.nonce, self.bits, self.version, self.reward)
    }
}

impl From<&GenesisBlock> for Block {
    fn from(genesis: &GenesisBlock) -> Self {
        genesis.build()
    }
}

/// Builds a genesis block. Its coinbase input script carries the compact
/// target 486604799, the number 4 and `timestamp_text`. The only output pays
/// `reward` to `output_script`.
pub fn create_genesis_block(
    timestamp_text: &str,
    output_script: Script,
    time: u32,
    nonce: u32,
    bits: u32,
    version: i32,
    reward: Amount,
) -> Block {
    let signature_script = Script::new().push_int(GENESIS_COINBASE_BITS).push_num(4).push_slice(timestamp_text.as_bytes());
    let coinbase = Transaction::new(
        1,
        vec![TransactionInput::coinbase(signature_script)],
        vec![TransactionOutput::new(reward, output_script)],
        0,
    );

    let header = Header::new(version, ZERO_HASH, coinbase.id(), time, bits, nonce);
    Block::new(header, vec![coinbase])
}

/// Checks `block` against the literal hash and merkle root of its network
pub fn verify_genesis(block: &Block, expected: &GenesisConstants) -> Result<(), GenesisError> {
    let expected_merkle = parse_literal(expected.hash_merkle_root)?;
    let computed_merkle = block.compute_merkle_root();
    if computed_merkle != expected_merkle {
        return Err(GenesisError::MerkleRootMismatch { expected: expected_merkle, computed: computed_merkle });
    }

    let expected_hash = parse_literal(expected.hash)?;
    let computed_hash = block.hash();
    if computed_hash != expected_hash {
        return Err(GenesisError::HashMismatch { expected: expected_hash, computed: computed_hash });
    }
    Ok(())
}

/// Builds `genesis` and aborts if it does not reproduce `expected`. A mismatch
/// means the compiled-in parameters are broken.
pub fn build_verified(genesis: &GenesisBlock, expected: &GenesisConstants) -> Block {
    let block = genesis.build();
    if let Err(err) = verify_genesis(&block, expected) {
        panic!("genesis block does not match its constants: {err}");
    }
    block
}

fn parse_literal(s: &'static str) -> Result<Hash, GenesisError> {
    Hash::from_hex(s).map_err(|_| GenesisError::InvalidLiteral(s))
}
