// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Network used when nothing has been configured yet, and the source of
/// defaults for unknown network names.
pub const DEFAULT_NETWORK: &str = "gemini-3g";

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Failed to parse network config JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Network '{0}' not found in configuration")]
    NetworkNotFound(String),

    #[error("Network name cannot be empty")]
    EmptyNetworkName,

    /// `field` names the configuration key holding the URL.
    #[error("Invalid {field} '{url}': {reason}")]
    InvalidUrl {
        field: &'static str,
        url: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub symbol: String,
    pub image: String,
}

/// The active network configuration of a session.
///
/// Serialized form is the persisted JSON blob keyed by `networkName`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub network_name: String,
    pub ws_rpc_url: String,
    pub address_prefix: u16,
    pub unit: Unit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexer_url: Option<String>,
}

impl Configuration {
    pub fn validate(&self) -> Result<(), NetworkError> {
        if self.network_name.trim().is_empty() {
            return Err(NetworkError::EmptyNetworkName);
        }
        validate_rpc_url("wsRpcUrl", &self.ws_rpc_url)?;
        if let Some(indexer) = &self.indexer_url {
            validate_http_url("indexerUrl", indexer)?;
        }
        Ok(())
    }
}

/// Overrides supplied by a `configure` request. Only `network_name` is
/// mandatory, everything else falls back to the network defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationRequest {
    pub network_name: String,
    #[serde(default)]
    pub ws_rpc_url: Option<String>,
    #[serde(default)]
    pub address_prefix: Option<u16>,
    #[serde(default)]
    pub unit: Option<Unit>,
    #[serde(default)]
    pub indexer_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDefaults {
    pub ws_rpc_url: String,
    pub address_prefix: u16,
    pub unit: Unit,
    #[serde(default)]
    pub indexer_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NetworkConfigs {
    networks: HashMap<String, NetworkDefaults>,
}

impl NetworkConfigs {
    pub fn load() -> Result<Self, NetworkError> {
        const NETWORKS_JSON: &str = include_str!("networks.json");
        let networks: HashMap<String, NetworkDefaults> = serde_json::from_str(NETWORKS_JSON)?;
        if !networks.contains_key(DEFAULT_NETWORK) {
            return Err(NetworkError::NetworkNotFound(DEFAULT_NETWORK.to_string()));
        }
        Ok(Self { networks })
    }

    pub fn get(&self, network_name: &str) -> Option<&NetworkDefaults> {
        self.networks
            .get(network_name)
            .or_else(|| self.networks.get(&network_name.to_lowercase()))
    }

    pub fn network_names(&self) -> Vec<&str> {
        self.networks.keys().map(|s| s.as_str()).collect()
    }

    /// The configuration used before the first successful `configure`.
    pub fn default_configuration(&self) -> Configuration {
        let defaults = self.defaults_for(DEFAULT_NETWORK);
        Configuration {
            network_name: DEFAULT_NETWORK.to_string(),
            ws_rpc_url: defaults.ws_rpc_url.clone(),
            address_prefix: defaults.address_prefix,
            unit: defaults.unit.clone(),
            indexer_url: defaults.indexer_url.clone(),
        }
    }

    /// Merge a request over the defaults of the requested network.
    ///
    /// Unknown network names take the default network's values but keep
    /// their own name.
    pub fn resolve(&self, request: ConfigurationRequest) -> Result<Configuration, NetworkError> {
        if request.network_name.trim().is_empty() {
            return Err(NetworkError::EmptyNetworkName);
        }

        let defaults = self.defaults_for(&request.network_name);
        let configuration = Configuration {
            ws_rpc_url: request
                .ws_rpc_url
                .unwrap_or_else(|| defaults.ws_rpc_url.clone()),
            address_prefix: request.address_prefix.unwrap_or(defaults.address_prefix),
            unit: request.unit.unwrap_or_else(|| defaults.unit.clone()),
            indexer_url: request.indexer_url.or_else(|| defaults.indexer_url.clone()),
            network_name: request.network_name,
        };

        configuration.validate()?;
        Ok(configuration)
    }

    fn defaults_for(&self, network_name: &str) -> &NetworkDefaults {
        self.get(network_name).unwrap_or_else(|| {
            // `load` guarantees the default network is present
            &self.networks[DEFAULT_NETWORK]
        })
    }
}

fn validate_rpc_url(field: &'static str, url_str: &str) -> Result<(), NetworkError> {
    let parsed = parse_url(field, url_str)?;
    match parsed.scheme() {
        "ws" | "wss" | "http" | "https" => Ok(()),
        scheme => Err(NetworkError::InvalidUrl {
            field,
            url: url_str.to_string(),
            reason: format!(
                "Invalid URL scheme '{}'. Must be ws://, wss://, http://, or https://",
                scheme
            ),
        }),
    }
}

fn validate_http_url(field: &'static str, url_str: &str) -> Result<(), NetworkError> {
    let parsed = parse_url(field, url_str)?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(NetworkError::InvalidUrl {
            field,
            url: url_str.to_string(),
            reason: format!("Invalid URL scheme '{}'. Must be http:// or https://", scheme),
        }),
    }
}

fn parse_url(field: &'static str, url_str: &str) -> Result<url::Url, NetworkError> {
    if url_str.is_empty() {
        return Err(NetworkError::InvalidUrl {
            field,
            url: String::new(),
            reason: "URL cannot be empty".to_string(),
        });
    }
    url::Url::parse(url_str).map_err(|e| NetworkError::InvalidUrl {
        field,
        url: url_str.to_string(),
        reason: e.to_string(),
    })
}
