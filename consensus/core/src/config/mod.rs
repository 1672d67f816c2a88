//! Compiled-in parameters of the main, test and regtest networks.

pub mod checkpoints;
pub mod genesis;
pub mod network_params;
pub mod node;
pub mod params;
pub mod registry;

pub use checkpoints::{ChainTxData, CheckpointData};
pub use network_params::NetworkParams;
pub use node::{ChainConfig, DeploymentOverride};
pub use params::{ConsensusParams, Deployment, DeploymentPos};
pub use registry::ChainParamsRegistry;
