use log::info;
use serde::{Deserialize, Serialize};

use super::checkpoints::{ChainTxData, CheckpointData};
use super::genesis::{build_verified, MAIN_GENESIS, MAIN_GENESIS_CONSTANTS, REGTEST_GENESIS, TESTNET_GENESIS};
use super::params::{hash_literal, ConsensusParams};
use crate::block::Block;
use crate::network::NetworkId;

/// Magic bytes starting every P2P message of a network
pub type MessageStart = [u8; 4];

/// Kinds of base58 encoded payloads
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
}

/// Version prefixes of base58 encoded payloads
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Base58Prefixes {
    pub pubkey_address: u8,
    pub script_address: u8,
    pub secret_key: u8,
    pub ext_public_key: [u8; 4],
    pub ext_secret_key: [u8; 4],
}

impl Base58Prefixes {
    pub fn prefix(&self, kind: Base58Type) -> &[u8] {
        match kind {
            Base58Type::PubkeyAddress => std::slice::from_ref(&self.pubkey_address),
            Base58Type::ScriptAddress => std::slice::from_ref(&self.script_address),
            Base58Type::SecretKey => std::slice::from_ref(&self.secret_key),
            Base58Type::ExtPublicKey => &self.ext_public_key,
            Base58Type::ExtSecretKey => &self.ext_secret_key,
        }
    }

    fn test_chains() -> Self {
        Self {
            pubkey_address: 111,
            script_address: 196,
            secret_key: 239,
            ext_public_key: [0x04, 0x35, 0x87, 0xcf],
            ext_secret_key: [0x04, 0x35, 0x83, 0x94],
        }
    }
}

/// A DNS seed queried for peer addresses
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsSeed {
    pub name: String,
    pub host: String,
    /// Whether the seed filters results by service bits
    pub supports_service_bits: bool,
}

impl DnsSeed {
    pub fn new(name: &str, host: &str, supports_service_bits: bool) -> Self {
        Self { name: name.to_string(), host: host.to_string(), supports_service_bits }
    }
}

/// A hard-coded peer address, IPv6 or IPv4-mapped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSpec6 {
    pub addr: [u8; 16],
    pub port: u16,
}

/// Everything that identifies and configures one network
#[derive(Clone, Debug)]
pub struct NetworkParams {
    pub network: NetworkId,
    pub consensus: ConsensusParams,
    pub message_start: MessageStart,
    pub default_port: u16,
    pub prune_after_height: u64,
    pub genesis: Block,
    pub dns_seeds: Vec<DnsSeed>,
    pub fixed_seeds: Vec<SeedSpec6>,
    pub base58_prefixes: Base58Prefixes,
    pub checkpoints: CheckpointData,

    pub mining_requires_peers: bool,
    pub default_consistency_checks: bool,
    pub require_standard: bool,
    pub mine_blocks_on_demand: bool,
    pub testnet_to_be_deprecated_field_rpc: bool,
}

impl NetworkParams {
    pub fn new(network: NetworkId) -> Self {
        match network {
            NetworkId::Main => Self::main(),
            NetworkId::Test => Self::testnet(),
            NetworkId::Regtest => Self::regtest(),
        }
    }

    pub fn main() -> Self {
        let genesis = build_verified(&MAIN_GENESIS, &MAIN_GENESIS_CONSTANTS);
        let mut consensus = ConsensusParams::main();
        consensus.hash_genesis_block = genesis.hash();

        let params = Self {
            network: NetworkId::Main,
            consensus,
            message_start: [0xf1, 0xba, 0xb6, 0xdb],
            default_port: 8337,
            prune_after_height: 100_000,
            genesis,
            dns_seeds: vec![
                DnsSeed::new("ixcoin.co", "uk.ixcoin.co", false),
                DnsSeed::new("ixcoin.co", "nyc.ixcoin.co", false),
                DnsSeed::new("ixcoin.co", "sgp.ixcoin.co", false),
            ],
            fixed_seeds: Vec::new(),
            base58_prefixes: Base58Prefixes {
                pubkey_address: 138,
                script_address: 5,
                secret_key: 128,
                ext_public_key: [0x04, 0x88, 0xb2, 0x1e],
                ext_secret_key: [0x04, 0x88, 0xad, 0xe4],
            },
            checkpoints: CheckpointData::new(
                [
                    (4_500, hash_literal("00000000de37be98ca45cf0613fa2a321eba28e237543f9fee9b6a7605d03a94")),
                    (198_007, hash_literal("00fdfc9130416482887e4d56f89f4568c2f4d7764d14cc66833503f31a6ac73d")),
                ],
                ChainTxData { time: 1_397_025_496, tx_count: 293_785, tx_per_day: 210.0 },
            ),
            mining_requires_peers: true,
            default_consistency_checks: false,
            require_standard: true,
            mine_blocks_on_demand: false,
            testnet_to_be_deprecated_field_rpc: false,
        };
        params.log_built();
        params
    }

    pub fn testnet() -> Self {
        let genesis = TESTNET_GENESIS.build();
        let mut consensus = ConsensusParams::testnet();
        consensus.hash_genesis_block = genesis.hash();

        let params = Self {
            network: NetworkId::Test,
            consensus,
            message_start: [0x0b, 0x11, 0x09, 0x07],
            default_port: 18333,
            prune_after_height: 1000,
            genesis,
            dns_seeds: vec![
                DnsSeed::new("testnetbitcoin.jonasschnelli.ch", "testnet-seed.bitcoin.jonasschnelli.ch", true),
                DnsSeed::new("petertodd.org", "seed.tbtc.petertodd.org", true),
                DnsSeed::new("bluematt.me", "testnet-seed.bluematt.me", false),
                DnsSeed::new("bitcoin.schildbach.de", "testnet-seed.bitcoin.schildbach.de", false),
            ],
            fixed_seeds: Vec::new(),
            base58_prefixes: Base58Prefixes::test_chains(),
            checkpoints: CheckpointData::new(
                [(546, hash_literal("000000002a936ca763904c3c35fce2f3556c559c0214345d31b1bcebf76acb70"))],
                ChainTxData { time: 1_337_966_069, tx_count: 1488, tx_per_day: 300.0 },
            ),
            mining_requires_peers: true,
            default_consistency_checks: false,
            require_standard: false,
            mine_blocks_on_demand: false,
            testnet_to_be_deprecated_field_rpc: true,
        };
        params.log_built();
        params
    }

    pub fn regtest() -> Self {
        let genesis = REGTEST_GENESIS.build();
        let mut consensus = ConsensusParams::regtest();
        consensus.hash_genesis_block = genesis.hash();

        let params = Self {
            network: NetworkId::Regtest,
            message_start: [0xfa, 0xbf, 0xb5, 0xda],
            default_port: 18444,
            prune_after_height: 1000,
            // Regtest has no seeds, peers are added manually
            dns_seeds: Vec::new(),
            fixed_seeds: Vec::new(),
            base58_prefixes: Base58Prefixes::test_chains(),
            checkpoints: CheckpointData::new([(0, consensus.hash_genesis_block)], ChainTxData::default()),
            consensus,
            genesis,
            mining_requires_peers: false,
            default_consistency_checks: true,
            require_standard: false,
            mine_blocks_on_demand: true,
            testnet_to_be_deprecated_field_rpc: false,
        };
        params.log_built();
        params
    }

    pub fn name(&self) -> &'static str {
        self.network.name()
    }

    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] {
        self.base58_prefixes.prefix(kind)
    }

    fn log_built(&self) {
        info!(
            "Built {} parameters: genesis {}, magic {}, port {}",
            self.network,
            self.consensus.hash_genesis_block,
            hex::encode(self.message_start),
            self.default_port
        );
    }
}
