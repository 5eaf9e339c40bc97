// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::BuildError;
use crate::chain::ChainSnapshot;
use crate::types::HexHash;
use crate::utils::{decode_hex, parse_hex_u128, to_hex};
use parity_scale_codec::{Compact, Decode, Encode};
use serde::{Deserialize, Serialize};
use sp_runtime::generic::Era;

/// Sender placeholder written into every built payload. The signing step
/// substitutes the real account.
pub const PLACEHOLDER_ADDRESS: &str = "0x0000000";

/// Validity window of a built payload, in blocks.
pub const DEFAULT_ERA_PERIOD: u64 = 50;

/// The only extrinsic format version the builder emits.
pub const EXTRINSIC_VERSION: u8 = 4;

/// Payloads above this size are signed through their blake2-256 hash.
const MAX_SIGNED_PAYLOAD_LEN: usize = 256;

/// Mortal era as requested, before the chain's power-of-two rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EraDescriptor {
    pub current: u64,
    pub period: u64,
}

impl EraDescriptor {
    pub fn mortal(current: u32) -> Self {
        Self {
            current: u64::from(current),
            period: DEFAULT_ERA_PERIOD,
        }
    }

    pub fn to_era(self) -> Era {
        Era::mortal(self.period, self.current)
    }
}

/// Typed signer payload assembled from one chain snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerPayload {
    pub address: String,
    pub block_hash: HexHash,
    pub block_number: u32,
    pub era: EraDescriptor,
    pub genesis_hash: HexHash,
    pub method: Vec<u8>,
    pub nonce: u32,
    pub signed_extensions: Vec<String>,
    pub spec_version: u32,
    pub tip: u128,
    pub transaction_version: u32,
    pub version: u8,
}

impl SignerPayload {
    pub fn new(snapshot: &ChainSnapshot, method: Vec<u8>) -> Self {
        Self {
            address: PLACEHOLDER_ADDRESS.to_string(),
            block_hash: snapshot.block_hash,
            block_number: snapshot.block_number,
            era: EraDescriptor::mortal(snapshot.block_number),
            genesis_hash: snapshot.genesis_hash,
            method,
            nonce: snapshot.account_nonce,
            signed_extensions: Vec::new(),
            spec_version: snapshot.runtime_version.spec_version,
            tip: 0,
            transaction_version: snapshot.runtime_version.transaction_version,
            version: snapshot.extrinsic_version,
        }
    }

    pub fn to_json(&self) -> SignerPayloadJson {
        SignerPayloadJson {
            address: self.address.clone(),
            block_hash: self.block_hash.to_string(),
            block_number: format_u32(self.block_number),
            era: to_hex(&self.era.to_era().encode()),
            genesis_hash: self.genesis_hash.to_string(),
            method: to_hex(&self.method),
            nonce: format_u32(self.nonce),
            signed_extensions: self.signed_extensions.clone(),
            spec_version: format_u32(self.spec_version),
            tip: format!("0x{:032x}", self.tip),
            transaction_version: format_u32(self.transaction_version),
            version: self.version,
        }
    }
}

fn format_u32(value: u32) -> String {
    format!("0x{:08x}", value)
}

/// Wire form of a signer payload, as consumed by signer extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerPayloadJson {
    pub address: String,
    pub block_hash: String,
    pub block_number: String,
    pub era: String,
    pub genesis_hash: String,
    pub method: String,
    pub nonce: String,
    pub signed_extensions: Vec<String>,
    pub spec_version: String,
    pub tip: String,
    pub transaction_version: String,
    pub version: u8,
}

/// The decoded fields of a [`SignerPayloadJson`] that enter the signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtrinsicPayload {
    pub method: Vec<u8>,
    pub era: Era,
    pub nonce: u32,
    pub tip: u128,
    pub spec_version: u32,
    pub transaction_version: u32,
    pub genesis_hash: HexHash,
    pub block_hash: HexHash,
}

impl SignerPayloadJson {
    pub fn parse(&self) -> Result<ExtrinsicPayload, BuildError> {
        if self.version != EXTRINSIC_VERSION {
            return Err(BuildError::UnsupportedExtrinsicVersion(self.version));
        }

        let era_bytes = decode_hex(&self.era).map_err(|e| malformed("era", e))?;
        let mut era_input = era_bytes.as_slice();
        let era = Era::decode(&mut era_input).map_err(|e| malformed("era", e))?;
        if !era_input.is_empty() {
            return Err(malformed("era", "trailing bytes"));
        }

        Ok(ExtrinsicPayload {
            method: decode_hex(&self.method).map_err(|e| malformed("method", e))?,
            era,
            nonce: parse_u32("nonce", &self.nonce)?,
            tip: parse_hex_u128(&self.tip).ok_or_else(|| malformed("tip", &self.tip))?,
            spec_version: parse_u32("specVersion", &self.spec_version)?,
            transaction_version: parse_u32("transactionVersion", &self.transaction_version)?,
            genesis_hash: self
                .genesis_hash
                .parse()
                .map_err(|e| malformed("genesisHash", e))?,
            block_hash: self
                .block_hash
                .parse()
                .map_err(|e| malformed("blockHash", e))?,
        })
    }

    /// Bytes a signer signs for this payload.
    pub fn signing_bytes(&self) -> Result<Vec<u8>, BuildError> {
        Ok(self.parse()?.signing_bytes())
    }
}

impl ExtrinsicPayload {
    pub fn signing_bytes(&self) -> Vec<u8> {
        let mut bytes = self.method.clone();
        self.era.encode_to(&mut bytes);
        Compact(self.nonce).encode_to(&mut bytes);
        Compact(self.tip).encode_to(&mut bytes);
        self.spec_version.encode_to(&mut bytes);
        self.transaction_version.encode_to(&mut bytes);
        bytes.extend_from_slice(self.genesis_hash.as_bytes());
        bytes.extend_from_slice(self.block_hash.as_bytes());

        if bytes.len() > MAX_SIGNED_PAYLOAD_LEN {
            sp_core::blake2_256(&bytes).to_vec()
        } else {
            bytes
        }
    }
}

fn parse_u32(field: &str, value: &str) -> Result<u32, BuildError> {
    parse_hex_u128(value)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| malformed(field, value))
}

fn malformed(field: &str, detail: impl std::fmt::Display) -> BuildError {
    BuildError::MalformedPayload(format!("{}: {}", field, detail))
}
