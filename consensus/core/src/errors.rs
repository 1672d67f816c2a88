use thiserror::Error;

use crate::config::params::DeploymentPos;
use crate::network::NetworkId;
use crate::Hash;

/// Failures of network selection and parameter overrides
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("Unknown network {0:?}")]
    UnknownNetwork(String),

    #[error("Network {current} is already selected, cannot switch to {requested}")]
    NetworkAlreadySelected { current: NetworkId, requested: NetworkId },

    #[error("Unknown deployment {0:?}")]
    UnknownDeployment(String),

    #[error("Invalid deployment override {0:?}, expected deployment:start:timeout")]
    InvalidDeploymentOverride(String),

    #[error("Deployment parameters for {deployment} may only be overridden on regtest, not on {network}")]
    OverrideRequiresRegtest { deployment: DeploymentPos, network: NetworkId },
}

/// Mismatch between a constructed genesis block and the network's literal constants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenesisError {
    #[error("Genesis hash mismatch: expected {expected}, computed {computed}")]
    HashMismatch { expected: Hash, computed: Hash },

    #[error("Genesis merkle root mismatch: expected {expected}, computed {computed}")]
    MerkleRootMismatch { expected: Hash, computed: Hash },

    #[error("Invalid genesis literal {0:?}")]
    InvalidLiteral(&'static str),
}

/// Failures while loading the node's chain configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Params(#[from] ParamsError),
}
