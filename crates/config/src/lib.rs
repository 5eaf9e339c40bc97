// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

mod args;
mod error;
mod log;
mod network;

pub use args::Args;
pub use error::ConfigError;
pub use log::LogConfig;
pub use network::{
    Configuration, ConfigurationRequest, DEFAULT_NETWORK, NetworkConfigs, NetworkDefaults,
    NetworkError, Unit,
};

use serde::Deserialize;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct StateConfig {
    /// File holding the persisted network configuration
    ///
    /// Env: SNAP_STATE_PATH
    /// Default: ./snap-state.json
    #[serde(default = "default_state_path")]
    pub path: String,
}

fn default_state_path() -> String {
    "./snap-state.json".to_string()
}

impl StateConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.path.trim().is_empty() {
            return Err(ConfigError::ValidateError(
                "State path cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

#[derive(Clone, Default, Deserialize)]
pub struct CustodyConfig {
    /// Secret phrase for the in-memory key custody
    ///
    /// Env: SNAP_SEED_PHRASE
    #[serde(default)]
    pub seed_phrase: Option<String>,
}

// Never print the secret phrase
impl fmt::Debug for CustodyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustodyConfig")
            .field(
                "seed_phrase",
                &self.seed_phrase.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct BridgeConfig {
    pub log: LogConfig,
    pub state: StateConfig,
    pub custody: CustodyConfig,
}

impl BridgeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            log: envy::prefixed("SNAP_LOG_").from_env::<LogConfig>()?,
            state: envy::prefixed("SNAP_STATE_").from_env::<StateConfig>()?,
            custody: envy::prefixed("SNAP_").from_env::<CustodyConfig>()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load variables from `env_file` (if it exists) and then read the
    /// environment.
    pub fn from_env_file(env_file: &str) -> Result<Self, ConfigError> {
        if Path::new(env_file).exists() {
            dotenv::from_path(env_file).map_err(|source| ConfigError::EnvFileError {
                path: env_file.to_string(),
                source,
            })?;
        }
        Self::from_env()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.log.validate()?;
        self.state.validate()?;
        Ok(())
    }
}
