use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use super::params::DeploymentPos;
use super::registry::ChainParamsRegistry;
use crate::errors::{ConfigError, ParamsError};
use crate::network::NetworkId;

/// Chain selection part of the node configuration
///
/// ```toml
/// network = "regtest"
///
/// [[deployment_overrides]]
/// deployment = "segwit"
/// start_time = 0
/// timeout = 999999999999
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub network: NetworkId,
    /// Regtest only
    pub deployment_overrides: Vec<DeploymentOverride>,
}

/// Replacement schedule for one version-bits deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentOverride {
    pub deployment: DeploymentPos,
    pub start_time: i64,
    pub timeout: i64,
}

impl FromStr for DeploymentOverride {
    type Err = ParamsError;

    /// Parses `deployment:start_time:timeout`, e.g. `segwit:0:999999999999`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParamsError::InvalidDeploymentOverride(s.to_string());
        let mut parts = s.split(':');
        let (Some(name), Some(start), Some(timeout), None) = (parts.next(), parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };

        Ok(Self {
            deployment: name.parse()?,
            start_time: start.parse().map_err(|_| invalid())?,
            timeout: timeout.parse().map_err(|_| invalid())?,
        })
    }
}

impl ChainConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file if it exists, otherwise use defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Builds the parameter registry, applies the deployment overrides and
    /// selects the configured network.
    pub fn build_registry(&self) -> Result<ChainParamsRegistry, ConfigError> {
        if let Some(first) = self.deployment_overrides.first() {
            if self.network != NetworkId::Regtest {
                return Err(ParamsError::OverrideRequiresRegtest { deployment: first.deployment, network: self.network }.into());
            }
        }

        let mut registry = ChainParamsRegistry::new();
        for o in &self.deployment_overrides {
            registry.update_regtest_deployment(o.deployment, o.start_time, o.timeout);
        }
        registry.select_network(self.network.name())?;
        Ok(registry)
    }
}
