// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared chain fixtures for unit tests.

#![allow(dead_code, non_camel_case_types)]

use crate::custody::MemoryKeyCustody;
use crate::payload::{PLACEHOLDER_ADDRESS, SignerPayloadJson};
use config::{Configuration, Unit};
use frame_metadata::RuntimeMetadataPrefixed;
use frame_metadata::v14::{
    ExtrinsicMetadata, PalletCallMetadata, PalletMetadata, RuntimeMetadataV14,
};
use parity_scale_codec::Encode;
use scale_info::{TypeInfo, meta_type};
use serde_json::{Value, json};
use subxt_rpcs::client::MockRpcClient;
use subxt_rpcs::client::mock_rpc_client::{Json as MockJson, MockRpcClientBuilder};

pub const GENESIS_HASH: &str =
    "0xabc0000000000000000000000000000000000000000000000000000000000000";

/// Hash of `header_json(100)`.
pub const HEADER_HASH: &str =
    "0x2ac3de3611a7286f81fda326d1674002abe9c9a8d1a01439a492ecfbd5b5738d";

pub fn header_json(number: u32) -> Value {
    json!({
        "parentHash": "0x9999990000000000000000000000000000000000000000000000000000000000",
        "number": format!("0x{:x}", number),
        "stateRoot": "0xdef0000000000000000000000000000000000000000000000000000000000000",
        "extrinsicsRoot": "0x1230000000000000000000000000000000000000000000000000000000000000",
        "digest": { "logs": [] }
    })
}

#[derive(TypeInfo)]
enum BalancesCall {
    #[codec(index = 0)]
    transfer_allow_death,
    #[codec(index = 3)]
    force_transfer,
}

#[derive(TypeInfo)]
enum LegacyBalancesCall {
    #[codec(index = 7)]
    transfer,
}

#[derive(TypeInfo)]
enum DomainsCall {
    #[codec(index = 0)]
    register_operator,
    #[codec(index = 1)]
    nominate_operator,
    #[codec(index = 3)]
    deregister_operator,
    #[codec(index = 5)]
    withdraw_stake,
}

#[derive(TypeInfo)]
enum SystemCall {
    #[codec(index = 0)]
    remark,
}

fn pallet<T: TypeInfo + 'static>(name: &'static str, index: u8) -> PalletMetadata {
    PalletMetadata {
        name,
        storage: None,
        calls: Some(PalletCallMetadata {
            ty: meta_type::<T>(),
        }),
        event: None,
        constants: vec![],
        error: None,
        index,
    }
}

fn encode_metadata(pallets: Vec<PalletMetadata>) -> String {
    let metadata = RuntimeMetadataV14::new(
        pallets,
        ExtrinsicMetadata {
            ty: meta_type::<()>(),
            version: 4,
            signed_extensions: vec![],
        },
        meta_type::<()>(),
    );
    format!("0x{}", hex::encode(RuntimeMetadataPrefixed::from(metadata).encode()))
}

/// Balances at index 4 and Domains at index 12.
pub fn metadata_hex() -> String {
    encode_metadata(vec![
        pallet::<SystemCall>("System", 0),
        pallet::<BalancesCall>("Balances", 4),
        pallet::<DomainsCall>("Domains", 12),
    ])
}

/// An older runtime: only `Balances.transfer`, no Domains pallet.
pub fn legacy_transfer_metadata_hex() -> String {
    encode_metadata(vec![
        pallet::<SystemCall>("System", 0),
        pallet::<LegacyBalancesCall>("Balances", 5),
    ])
}

/// A node at block 100 on which the account has nonce 3 and no balance.
pub fn mock_chain_builder() -> MockRpcClientBuilder {
    MockRpcClient::builder()
        .method_handler("chain_getBlockHash", async |_params| {
            MockJson(GENESIS_HASH)
        })
        .method_handler("state_getRuntimeVersion", async |_params| {
            MockJson(json!({
                "specName": "subspace",
                "implName": "subspace",
                "authoringVersion": 0,
                "specVersion": 5,
                "implVersion": 0,
                "apis": [],
                "transactionVersion": 1,
                "stateVersion": 1
            }))
        })
        .method_handler("state_getMetadata", async |_params| {
            MockJson(metadata_hex())
        })
        .method_handler("chain_getHeader", async |_params| {
            MockJson(header_json(100))
        })
        .method_handler("system_accountNextIndex", async |_params| MockJson(3u64))
        .method_handler("state_getStorage", async |_params| MockJson(None::<String>))
        .method_handler("chain_getFinalizedHead", async |_params| {
            MockJson(HEADER_HASH)
        })
        .method_handler("author_submitExtrinsic", async |_params| {
            MockJson(HEADER_HASH)
        })
}

pub fn alice_custody() -> MemoryKeyCustody {
    MemoryKeyCustody::from_phrase("//Alice").expect("dev phrase is valid")
}

pub fn test_configuration() -> Configuration {
    Configuration {
        network_name: "devnet".to_string(),
        ws_rpc_url: "ws://127.0.0.1:9944".to_string(),
        address_prefix: 42,
        unit: Unit {
            symbol: "tSSC".to_string(),
            image: "icon.svg".to_string(),
        },
        indexer_url: Some("http://127.0.0.1:4350/graphql".to_string()),
    }
}

/// Deregistration of operator 7, built at block 100 with nonce 3.
pub fn signer_payload_json() -> SignerPayloadJson {
    SignerPayloadJson {
        address: PLACEHOLDER_ADDRESS.to_string(),
        block_hash: HEADER_HASH.to_string(),
        block_number: "0x00000064".to_string(),
        era: "0x4502".to_string(),
        genesis_hash: GENESIS_HASH.to_string(),
        method: "0x0c030700000000000000".to_string(),
        nonce: "0x00000003".to_string(),
        signed_extensions: vec![],
        spec_version: "0x00000005".to_string(),
        tip: "0x00000000000000000000000000000000".to_string(),
        transaction_version: "0x00000001".to_string(),
        version: 4,
    }
}
