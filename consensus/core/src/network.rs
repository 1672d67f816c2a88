use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParamsError;

/// Identifies the network a node is operating on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// Main network
    #[default]
    Main,
    /// Public test network
    Test,
    /// Local regression-test network
    Regtest,
}

impl NetworkId {
    /// Returns an iterator over all NetworkId variants
    pub fn iter() -> impl Iterator<Item = NetworkId> {
        [NetworkId::Main, NetworkId::Test, NetworkId::Regtest].into_iter()
    }

    /// The name used to select the network
    pub fn name(&self) -> &'static str {
        match self {
            NetworkId::Main => "main",
            NetworkId::Test => "test",
            NetworkId::Regtest => "regtest",
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkId {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(NetworkId::Main),
            "test" => Ok(NetworkId::Test),
            "regtest" => Ok(NetworkId::Regtest),
            _ => Err(ParamsError::UnknownNetwork(s.to_string())),
        }
    }
}
