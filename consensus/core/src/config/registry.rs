use log::{info, warn};
use once_cell::sync::OnceCell;

use super::network_params::NetworkParams;
use super::params::{Deployment, DeploymentPos};
use crate::errors::ParamsError;
use crate::network::NetworkId;

/// Owns the parameter sets of every network and remembers which one the node
/// runs on.
///
/// The current network can be chosen once. Components that need parameters
/// take them from the registry or receive a `&NetworkParams` from their caller.
pub struct ChainParamsRegistry {
    main: NetworkParams,
    test: NetworkParams,
    regtest: NetworkParams,
    current: OnceCell<NetworkId>,
}

impl ChainParamsRegistry {
    pub fn new() -> Self {
        Self {
            main: NetworkParams::main(),
            test: NetworkParams::testnet(),
            regtest: NetworkParams::regtest(),
            current: OnceCell::new(),
        }
    }

    pub fn params(&self, network: NetworkId) -> &NetworkParams {
        match network {
            NetworkId::Main => &self.main,
            NetworkId::Test => &self.test,
            NetworkId::Regtest => &self.regtest,
        }
    }

    /// Looks up the parameters of the network called `name`
    pub fn select(&self, name: &str) -> Result<&NetworkParams, ParamsError> {
        Ok(self.params(name.parse()?))
    }

    /// Makes `name` the current network. Choosing the already selected network
    /// again is accepted, switching to another one is not.
    pub fn select_network(&self, name: &str) -> Result<&NetworkParams, ParamsError> {
        let requested: NetworkId = name.parse()?;
        let current = *self.current.get_or_init(|| {
            info!("Selected network {requested}");
            requested
        });
        if current != requested {
            return Err(ParamsError::NetworkAlreadySelected { current, requested });
        }
        Ok(self.params(current))
    }

    pub fn current_network(&self) -> Option<NetworkId> {
        self.current.get().copied()
    }

    pub fn try_current_params(&self) -> Option<&NetworkParams> {
        self.current_network().map(|network| self.params(network))
    }

    /// Parameters of the selected network.
    ///
    /// Panics if no network has been selected yet.
    pub fn current_params(&self) -> &NetworkParams {
        match self.try_current_params() {
            Some(params) => params,
            None => panic!("current network parameters requested before a network was selected"),
        }
    }

    /// Replaces the regtest schedule of `pos`. Only meant for test harnesses.
    pub fn update_regtest_deployment(&mut self, pos: DeploymentPos, start_time: i64, timeout: i64) {
        let deployment = self.regtest.consensus.deployment_mut(pos);
        warn!("Overriding regtest deployment {pos}: start {start_time}, timeout {timeout}");
        *deployment = Deployment::new(deployment.bit, start_time, timeout);
    }
}

impl Default for ChainParamsRegistry {
    fn default() -> Self {
        Self::new()
    }
}
