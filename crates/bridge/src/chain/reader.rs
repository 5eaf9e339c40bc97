// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only chain queries made on behalf of one request.

use super::indexer::{self, TransactionIndexer, TransactionRecord};
use super::{AccountBalance, Block, ChainError, RuntimeVersion};
use crate::custody::KeyCustody;
use crate::error::BridgeError;
use crate::state::ChainContext;
use crate::types::HexHash;
use crate::utils::BlockId;
use config::Configuration;
use sp_core::crypto::AccountId32;

/// Chain state a single payload build is based on.
///
/// Fetched fresh for every build and never shared between two of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSnapshot {
    pub block_hash: HexHash,
    pub block_number: u32,
    pub genesis_hash: HexHash,
    pub runtime_version: RuntimeVersion,
    pub extrinsic_version: u8,
    pub account_nonce: u32,
}

/// Fetch the latest header and the custody account's nonce concurrently.
pub async fn snapshot(
    ctx: &ChainContext<'_>,
    custody: &dyn KeyCustody,
) -> Result<ChainSnapshot, BridgeError> {
    let header = async { ctx.client.latest_header().await.map_err(BridgeError::from) };
    let nonce = async {
        let address = custody.address(ctx.configuration.address_prefix).await?;
        Ok::<_, BridgeError>(ctx.client.account_nonce(&address).await?)
    };
    let (header, account_nonce) = tokio::try_join!(header, nonce)?;

    let snapshot = ChainSnapshot {
        block_hash: header.hash,
        block_number: header.number,
        genesis_hash: ctx.client.genesis_hash(),
        runtime_version: ctx.client.runtime_version().clone(),
        extrinsic_version: ctx.client.extrinsic_version(),
        account_nonce,
    };

    tracing::debug!(
        block_hash = %snapshot.block_hash,
        block_number = snapshot.block_number,
        nonce = snapshot.account_nonce,
        spec_version = snapshot.runtime_version.spec_version,
        "Captured chain snapshot"
    );
    Ok(snapshot)
}

pub async fn balance(
    ctx: &ChainContext<'_>,
    account: &AccountId32,
) -> Result<AccountBalance, ChainError> {
    ctx.client.account_balance(account).await
}

pub async fn block(ctx: &ChainContext<'_>, id: &BlockId) -> Result<Block, ChainError> {
    ctx.client.block(id).await
}

pub async fn chain_head(ctx: &ChainContext<'_>) -> Result<HexHash, ChainError> {
    ctx.client.finalized_head().await
}

/// Transfer history of `address` from the network's indexer.
///
/// Served without a node connection.
pub async fn account_transactions(
    indexer: &dyn TransactionIndexer,
    configuration: &Configuration,
    address: &str,
) -> Result<Vec<TransactionRecord>, ChainError> {
    let url = configuration
        .indexer_url
        .as_deref()
        .ok_or_else(|| ChainError::IndexerNotConfigured(configuration.network_name.clone()))?;
    indexer::collect(indexer, url, address).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainClient;
    use crate::chain::RpcChainClient;
    use crate::chain::Header;
    use crate::payload::CallIndexTable;
    use crate::test_fixtures::{HEADER_HASH, alice_custody, mock_chain_builder, test_configuration};
    use async_trait::async_trait;
    use std::time::Duration;
    use subxt_rpcs::RpcClient;
    use tokio::sync::Notify;

    /// Each read waits until the other one has started, so the pair only
    /// completes when both are in flight at once.
    struct RendezvousChain {
        runtime_version: RuntimeVersion,
        calls: CallIndexTable,
        header_started: Notify,
        nonce_started: Notify,
    }

    impl RendezvousChain {
        fn new() -> Self {
            Self {
                runtime_version: RuntimeVersion {
                    spec_name: "subspace".to_string(),
                    spec_version: 5,
                    transaction_version: 1,
                },
                calls: CallIndexTable::new(),
                header_started: Notify::new(),
                nonce_started: Notify::new(),
            }
        }
    }

    #[async_trait]
    impl ChainClient for RendezvousChain {
        fn genesis_hash(&self) -> HexHash {
            HexHash::from([1u8; 32])
        }

        fn runtime_version(&self) -> &RuntimeVersion {
            &self.runtime_version
        }

        fn extrinsic_version(&self) -> u8 {
            4
        }

        fn calls(&self) -> &CallIndexTable {
            &self.calls
        }

        async fn latest_header(&self) -> Result<Header, ChainError> {
            self.header_started.notify_one();
            self.nonce_started.notified().await;
            Ok(Header {
                hash: HexHash::from([2u8; 32]),
                number: 7,
                parent_hash: HexHash::from([3u8; 32]),
                state_root: HexHash::from([4u8; 32]),
                extrinsics_root: HexHash::from([5u8; 32]),
            })
        }

        async fn finalized_head(&self) -> Result<HexHash, ChainError> {
            Err(ChainError::NotConnected)
        }

        async fn block(&self, _id: &BlockId) -> Result<Block, ChainError> {
            Err(ChainError::NotConnected)
        }

        async fn account_nonce(&self, _address: &str) -> Result<u32, ChainError> {
            self.nonce_started.notify_one();
            self.header_started.notified().await;
            Ok(9)
        }

        async fn account_balance(
            &self,
            _account: &AccountId32,
        ) -> Result<AccountBalance, ChainError> {
            Err(ChainError::NotConnected)
        }

        async fn submit_extrinsic(&self, _extrinsic: &str) -> Result<HexHash, ChainError> {
            Err(ChainError::NotConnected)
        }

        async fn disconnect(&self) {}
    }

    #[tokio::test]
    async fn test_snapshot_reads_header_and_nonce_concurrently() {
        let client = RendezvousChain::new();
        let configuration = test_configuration();
        let ctx = ChainContext {
            client: &client,
            configuration: &configuration,
        };

        let snapshot = tokio::time::timeout(
            Duration::from_secs(5),
            snapshot(&ctx, &alice_custody()),
        )
        .await
        .expect("header and nonce reads did not overlap")
        .unwrap();
        assert_eq!(snapshot.block_number, 7);
        assert_eq!(snapshot.account_nonce, 9);
    }

    #[tokio::test]
    async fn test_snapshot_combines_header_and_nonce() {
        let client = RpcChainClient::from_rpc_client(RpcClient::new(mock_chain_builder().build()))
            .await
            .unwrap();
        let configuration = test_configuration();
        let ctx = ChainContext {
            client: &client,
            configuration: &configuration,
        };

        let snapshot = snapshot(&ctx, &alice_custody()).await.unwrap();
        assert_eq!(snapshot.block_number, 100);
        assert_eq!(snapshot.block_hash.to_string(), HEADER_HASH);
        assert_eq!(snapshot.account_nonce, 3);
        assert_eq!(snapshot.genesis_hash, client.genesis_hash());
        assert_eq!(snapshot.extrinsic_version, 4);
    }

    #[tokio::test]
    async fn test_snapshot_fails_without_connection() {
        let client = RpcChainClient::from_rpc_client(RpcClient::new(mock_chain_builder().build()))
            .await
            .unwrap();
        client.disconnect().await;
        let configuration = test_configuration();
        let ctx = ChainContext {
            client: &client,
            configuration: &configuration,
        };

        let err = snapshot(&ctx, &alice_custody()).await.unwrap_err();
        assert!(matches!(
            err,
            BridgeError::ChainUnavailable(ChainError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn test_account_transactions_requires_indexer() {
        let mut configuration = test_configuration();
        configuration.indexer_url = None;
        let indexer = crate::chain::HttpIndexer::new();

        let err = account_transactions(&indexer, &configuration, "5Grw")
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::IndexerNotConfigured(ref name) if name == "devnet"));
    }
}
