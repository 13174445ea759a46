// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::Address;
use alloy::primitives::address;
use std::env;
use std::str::FromStr;

/// Environment variable overriding the ledger account the engine acts from.
pub const ENGINE_ADDRESS: &str = "MULTISENDER_ENGINE_ADDRESS";
const ENGINE_ADDRESS_BUILD_TIME_VAL: Option<&str> = option_env!("MULTISENDER_ENGINE_ADDRESS");
/// Environment variable capping the number of transfers in one batch.
pub const MAX_LEGS: &str = "MULTISENDER_MAX_LEGS";
const MAX_LEGS_BUILD_TIME_VAL: Option<&str> = option_env!("MULTISENDER_MAX_LEGS");

/// Address of the first contract a fresh local deployer creates.
pub const DEFAULT_ENGINE_ADDRESS: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid value {value:?} for env var {var}")]
    InvalidEnvVar { var: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The engine's own account: it receives native escrow and is the spender/operator of
    /// token transfers.
    pub engine_address: Address,
    /// Upper bound on transfers per batch. `None` means unbounded.
    pub max_legs: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine_address: DEFAULT_ENGINE_ADDRESS,
            max_legs: None,
        }
    }
}

impl Config {
    pub fn new(engine_address: Address) -> Self {
        Self {
            engine_address,
            ..Default::default()
        }
    }

    pub fn with_max_legs(mut self, max_legs: usize) -> Self {
        self.max_legs = Some(max_legs);
        self
    }

    /// Get the `Config` from environment variables, falling back to values set at build
    /// time and then to the defaults.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, Error> {
        let mut config = Self::default();

        let engine_address = lookup(ENGINE_ADDRESS)
            .or_else(|| ENGINE_ADDRESS_BUILD_TIME_VAL.map(|s| s.to_string()));
        if let Some(value) = engine_address {
            config.engine_address = Address::from_str(value.trim()).map_err(|_| {
                error!("Invalid engine address in {ENGINE_ADDRESS}: {value:?}");
                Error::InvalidEnvVar {
                    var: ENGINE_ADDRESS,
                    value: value.clone(),
                }
            })?;
            info!("Using engine address {} from {ENGINE_ADDRESS}", config.engine_address);
        }

        let max_legs =
            lookup(MAX_LEGS).or_else(|| MAX_LEGS_BUILD_TIME_VAL.map(|s| s.to_string()));
        if let Some(value) = max_legs {
            let max = value.trim().parse::<usize>().map_err(|_| Error::InvalidEnvVar {
                var: MAX_LEGS,
                value: value.clone(),
            })?;
            info!("Limiting batches to {max} transfers as {MAX_LEGS} is set");
            config.max_legs = Some(max);
        }

        Ok(config)
    }
}
