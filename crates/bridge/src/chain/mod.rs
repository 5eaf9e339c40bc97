// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Narrow read/submit contract the bridge needs from a chain node, plus
//! the read-side queries built on top of it.

pub mod indexer;
pub mod metadata;
pub mod reader;
pub mod rpc;

pub use indexer::{HttpIndexer, TransactionIndexer, TransactionRecord};
pub use reader::ChainSnapshot;
pub use rpc::{RpcChainClient, RpcConnector};

use crate::payload::CallIndexTable;
use crate::types::HexHash;
use crate::utils::BlockId;
use async_trait::async_trait;
use config::Configuration;
use serde::{Deserialize, Serialize};
use sp_core::crypto::AccountId32;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("No chain connection is open")]
    NotConnected,

    #[error("Failed to connect to {url}")]
    Connect {
        url: String,
        #[source]
        source: subxt_rpcs::Error,
    },

    #[error("RPC call {method} failed")]
    Rpc {
        method: &'static str,
        #[source]
        source: subxt_rpcs::Error,
    },

    #[error("Invalid response from {method}: {reason}")]
    InvalidResponse { method: &'static str, reason: String },

    #[error("Runtime metadata version is not supported")]
    UnsupportedMetadata,

    #[error("Block {0} not found")]
    BlockNotFound(String),

    #[error("Indexer request failed: {0}")]
    Indexer(String),

    #[error("No transaction indexer is configured for network '{0}'")]
    IndexerNotConfigured(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeVersion {
    pub spec_name: String,
    pub spec_version: u32,
    pub transaction_version: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub hash: HexHash,
    pub number: u32,
    pub parent_hash: HexHash,
    pub state_root: HexHash,
    pub extrinsics_root: HexHash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(flatten)]
    pub header: Header,
    pub extrinsics: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountBalance {
    pub free: u128,
    pub reserved: u128,
    pub frozen: u128,
}

/// An open connection to one chain.
///
/// Static chain facts are captured when the connection is established and
/// stay fixed for its lifetime.
#[async_trait]
pub trait ChainClient: Send + Sync {
    fn genesis_hash(&self) -> HexHash;

    fn runtime_version(&self) -> &RuntimeVersion;

    fn extrinsic_version(&self) -> u8;

    fn calls(&self) -> &CallIndexTable;

    async fn latest_header(&self) -> Result<Header, ChainError>;

    async fn finalized_head(&self) -> Result<HexHash, ChainError>;

    async fn block(&self, id: &BlockId) -> Result<Block, ChainError>;

    async fn account_nonce(&self, address: &str) -> Result<u32, ChainError>;

    async fn account_balance(&self, account: &AccountId32) -> Result<AccountBalance, ChainError>;

    /// Returns the extrinsic hash reported by the node.
    async fn submit_extrinsic(&self, extrinsic: &str) -> Result<HexHash, ChainError>;

    /// Close the connection. Later calls fail with [`ChainError::NotConnected`].
    async fn disconnect(&self);
}

#[async_trait]
pub trait ChainConnector: Send + Sync {
    async fn connect(
        &self,
        configuration: &Configuration,
    ) -> Result<Arc<dyn ChainClient>, ChainError>;
}
