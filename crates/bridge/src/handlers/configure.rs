// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::validation::SchemaError;
use config::{Configuration, ConfigurationRequest, NetworkConfigs, NetworkError};

/// Merge a configure request over its network defaults.
///
/// Problems are reported against the request field they came from.
pub fn resolve(
    networks: &NetworkConfigs,
    request: ConfigurationRequest,
) -> Result<Configuration, SchemaError> {
    networks.resolve(request).map_err(|e| match e {
        NetworkError::EmptyNetworkName => {
            SchemaError::new("configuration.networkName", "must not be empty")
        }
        NetworkError::InvalidUrl { field, url, reason } => SchemaError::new(
            format!("configuration.{}", field),
            format!("'{}': {}", url, reason),
        ),
        other => SchemaError::new("configuration", other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(network_name: &str) -> ConfigurationRequest {
        ConfigurationRequest {
            network_name: network_name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_known_network() {
        let networks = NetworkConfigs::load().unwrap();
        let configuration = resolve(&networks, request("gemini-3g")).unwrap();
        assert_eq!(configuration.network_name, "gemini-3g");
        assert_eq!(configuration.address_prefix, 2254);
    }

    #[test]
    fn test_resolve_reports_field() {
        let networks = NetworkConfigs::load().unwrap();

        let err = resolve(&networks, request("  ")).unwrap_err();
        assert_eq!(err.field, "configuration.networkName");

        let err = resolve(
            &networks,
            ConfigurationRequest {
                ws_rpc_url: Some("not a url".to_string()),
                ..request("devnet")
            },
        )
        .unwrap_err();
        assert_eq!(err.field, "configuration.wsRpcUrl");

        let err = resolve(
            &networks,
            ConfigurationRequest {
                indexer_url: Some("ftp://indexer".to_string()),
                ..request("devnet")
            },
        )
        .unwrap_err();
        assert_eq!(err.field, "configuration.indexerUrl");

        // Valid as an RPC endpoint but not as an indexer
        let err = resolve(
            &networks,
            ConfigurationRequest {
                ws_rpc_url: Some("ws://node:9944".to_string()),
                indexer_url: Some("ws://node:9944".to_string()),
                ..request("devnet")
            },
        )
        .unwrap_err();
        assert_eq!(err.field, "configuration.indexerUrl");
    }
}
