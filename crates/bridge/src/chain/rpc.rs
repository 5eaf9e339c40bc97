// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::metadata::decode_metadata_hex;
use super::{
    AccountBalance, Block, ChainClient, ChainConnector, ChainError, Header, RuntimeVersion,
};
use crate::payload::CallIndexTable;
use crate::types::HexHash;
use crate::utils::hash::{HashError, extract_block_number, extract_hash};
use crate::utils::{BlockId, compute_block_hash_from_header_json, decode_hex, to_hex};
use async_trait::async_trait;
use config::Configuration;
use parity_scale_codec::{Decode, Encode};
use serde_json::Value;
use sp_core::crypto::AccountId32;
use std::sync::{Arc, RwLock};
use subxt_rpcs::RpcClient;
use subxt_rpcs::client::rpc_params;

/// `pallet_balances::AccountData` as stored under `System.Account`.
#[derive(Debug, Decode, Encode)]
struct AccountData {
    free: u128,
    reserved: u128,
    frozen: u128,
    flags: u128,
}

#[derive(Debug, Decode, Encode)]
struct AccountInfo {
    nonce: u32,
    consumers: u32,
    providers: u32,
    sufficients: u32,
    data: AccountData,
}

/// [`ChainClient`] over a JSON-RPC connection to a Substrate node.
pub struct RpcChainClient {
    rpc: RwLock<Option<RpcClient>>,
    genesis_hash: HexHash,
    runtime_version: RuntimeVersion,
    extrinsic_version: u8,
    calls: CallIndexTable,
}

impl RpcChainClient {
    /// Fetch the static chain facts over `rpc` and wrap it.
    pub async fn from_rpc_client(rpc: RpcClient) -> Result<Self, ChainError> {
        let (genesis_hash, runtime_version, metadata) = tokio::try_join!(
            async {
                rpc.request::<String>("chain_getBlockHash", rpc_params![0u32])
                    .await
                    .map_err(|source| ChainError::Rpc {
                        method: "chain_getBlockHash",
                        source,
                    })
            },
            async {
                rpc.request::<RuntimeVersion>("state_getRuntimeVersion", rpc_params![])
                    .await
                    .map_err(|source| ChainError::Rpc {
                        method: "state_getRuntimeVersion",
                        source,
                    })
            },
            async {
                rpc.request::<String>("state_getMetadata", rpc_params![])
                    .await
                    .map_err(|source| ChainError::Rpc {
                        method: "state_getMetadata",
                        source,
                    })
            },
        )?;

        let genesis_hash = parse_hash("chain_getBlockHash", &genesis_hash)?;
        let summary = decode_metadata_hex(&metadata)?;

        tracing::info!(
            genesis = %genesis_hash,
            spec_name = %runtime_version.spec_name,
            spec_version = runtime_version.spec_version,
            calls = summary.calls.len(),
            "Chain connection established"
        );

        Ok(Self {
            rpc: RwLock::new(Some(rpc)),
            genesis_hash,
            runtime_version,
            extrinsic_version: summary.extrinsic_version,
            calls: summary.calls,
        })
    }

    fn rpc(&self) -> Result<RpcClient, ChainError> {
        self.rpc
            .read()
            .map_err(|_| ChainError::NotConnected)?
            .clone()
            .ok_or(ChainError::NotConnected)
    }

    async fn block_hash(&self, id: &BlockId) -> Result<HexHash, ChainError> {
        let params = match id {
            BlockId::Hash(hash) => return Ok(*hash),
            BlockId::Latest => rpc_params![],
            BlockId::Number(n) => rpc_params![*n],
        };
        let hash = self
            .rpc()?
            .request::<Option<String>>("chain_getBlockHash", params)
            .await
            .map_err(|source| ChainError::Rpc {
                method: "chain_getBlockHash",
                source,
            })?
            .ok_or_else(|| ChainError::BlockNotFound(id.to_string()))?;

        parse_hash("chain_getBlockHash", &hash)
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    fn genesis_hash(&self) -> HexHash {
        self.genesis_hash
    }

    fn runtime_version(&self) -> &RuntimeVersion {
        &self.runtime_version
    }

    fn extrinsic_version(&self) -> u8 {
        self.extrinsic_version
    }

    fn calls(&self) -> &CallIndexTable {
        &self.calls
    }

    async fn latest_header(&self) -> Result<Header, ChainError> {
        let header_json: Value = self
            .rpc()?
            .request("chain_getHeader", rpc_params![])
            .await
            .map_err(|source| ChainError::Rpc {
                method: "chain_getHeader",
                source,
            })?;

        // chain_getHeader does not include the hash of the header itself
        let hash = compute_block_hash_from_header_json(&header_json)
            .map_err(|e| invalid("chain_getHeader", e))?;
        parse_header("chain_getHeader", &header_json, hash)
    }

    async fn finalized_head(&self) -> Result<HexHash, ChainError> {
        let hash: String = self
            .rpc()?
            .request("chain_getFinalizedHead", rpc_params![])
            .await
            .map_err(|source| ChainError::Rpc {
                method: "chain_getFinalizedHead",
                source,
            })?;
        parse_hash("chain_getFinalizedHead", &hash)
    }

    async fn block(&self, id: &BlockId) -> Result<Block, ChainError> {
        let hash = self.block_hash(id).await?;
        let signed_block: Option<Value> = self
            .rpc()?
            .request("chain_getBlock", rpc_params![hash.to_string()])
            .await
            .map_err(|source| ChainError::Rpc {
                method: "chain_getBlock",
                source,
            })?;
        let signed_block = signed_block.ok_or_else(|| ChainError::BlockNotFound(id.to_string()))?;

        let block = signed_block
            .get("block")
            .ok_or_else(|| invalid("chain_getBlock", "missing block"))?;
        let header_json = block
            .get("header")
            .ok_or_else(|| invalid("chain_getBlock", "missing header"))?;
        let extrinsics = block
            .get("extrinsics")
            .and_then(|e| e.as_array())
            .ok_or_else(|| invalid("chain_getBlock", "missing extrinsics"))?
            .iter()
            .map(|e| {
                e.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| invalid("chain_getBlock", "extrinsic is not a string"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Block {
            header: parse_header("chain_getBlock", header_json, hash)?,
            extrinsics,
        })
    }

    async fn account_nonce(&self, address: &str) -> Result<u32, ChainError> {
        let nonce: u64 = self
            .rpc()?
            .request("system_accountNextIndex", rpc_params![address])
            .await
            .map_err(|source| ChainError::Rpc {
                method: "system_accountNextIndex",
                source,
            })?;
        u32::try_from(nonce)
            .map_err(|_| invalid("system_accountNextIndex", format!("nonce {} exceeds u32", nonce)))
    }

    async fn account_balance(&self, account: &AccountId32) -> Result<AccountBalance, ChainError> {
        let key = to_hex(&system_account_key(account));
        let storage: Option<String> = self
            .rpc()?
            .request("state_getStorage", rpc_params![key])
            .await
            .map_err(|source| ChainError::Rpc {
                method: "state_getStorage",
                source,
            })?;

        // Accounts that never received funds have no storage entry
        let Some(storage) = storage else {
            return Ok(AccountBalance::default());
        };

        let bytes = decode_hex(&storage).map_err(|e| invalid("state_getStorage", e))?;
        let info =
            AccountInfo::decode(&mut &bytes[..]).map_err(|e| invalid("state_getStorage", e))?;
        Ok(AccountBalance {
            free: info.data.free,
            reserved: info.data.reserved,
            frozen: info.data.frozen,
        })
    }

    async fn submit_extrinsic(&self, extrinsic: &str) -> Result<HexHash, ChainError> {
        let hash: String = self
            .rpc()?
            .request("author_submitExtrinsic", rpc_params![extrinsic])
            .await
            .map_err(|source| ChainError::Rpc {
                method: "author_submitExtrinsic",
                source,
            })?;
        parse_hash("author_submitExtrinsic", &hash)
    }

    async fn disconnect(&self) {
        let previous = match self.rpc.write() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if previous.is_some() {
            tracing::debug!(genesis = %self.genesis_hash, "Chain connection closed");
        }
    }
}

/// Opens JSON-RPC connections to the configured node.
#[derive(Debug, Default, Clone, Copy)]
pub struct RpcConnector;

#[async_trait]
impl ChainConnector for RpcConnector {
    async fn connect(
        &self,
        configuration: &Configuration,
    ) -> Result<Arc<dyn ChainClient>, ChainError> {
        tracing::info!(
            network = %configuration.network_name,
            url = %configuration.ws_rpc_url,
            "Connecting to chain"
        );
        let rpc = RpcClient::from_insecure_url(&configuration.ws_rpc_url)
            .await
            .map_err(|source| ChainError::Connect {
                url: configuration.ws_rpc_url.clone(),
                source,
            })?;
        Ok(Arc::new(RpcChainClient::from_rpc_client(rpc).await?))
    }
}

/// `twox128("System") ++ twox128("Account") ++ blake2_128(account) ++ account`
fn system_account_key(account: &AccountId32) -> Vec<u8> {
    let account: &[u8] = account.as_ref();
    let mut key = Vec::with_capacity(80);
    key.extend_from_slice(&sp_core::twox_128(b"System"));
    key.extend_from_slice(&sp_core::twox_128(b"Account"));
    key.extend_from_slice(&sp_core::blake2_128(account));
    key.extend_from_slice(account);
    key
}

fn parse_header(
    method: &'static str,
    header_json: &Value,
    hash: HexHash,
) -> Result<Header, ChainError> {
    let field = |name: &str| -> Result<HexHash, ChainError> {
        extract_hash(header_json, name).map_err(|e| invalid(method, e))
    };

    Ok(Header {
        hash,
        number: extract_block_number(header_json, "number")
            .map_err(|e: HashError| invalid(method, e))?,
        parent_hash: field("parentHash")?,
        state_root: field("stateRoot")?,
        extrinsics_root: field("extrinsicsRoot")?,
    })
}

fn parse_hash(method: &'static str, hash: &str) -> Result<HexHash, ChainError> {
    hash.parse().map_err(|e| invalid(method, e))
}

fn invalid(method: &'static str, reason: impl std::fmt::Display) -> ChainError {
    ChainError::InvalidResponse {
        method,
        reason: reason.to_string(),
    }
}
