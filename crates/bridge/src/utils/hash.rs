// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::hex::decode_hex;
use crate::types::HexHash;
use parity_scale_codec::{Decode, Encode};
use serde_json::Value;
use sp_runtime::generic::{Digest, DigestItem, Header};
use sp_runtime::traits::BlakeTwo256;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("Missing header field: {0}")]
    MissingField(String),

    #[error("Invalid hex in '{field}': {reason}")]
    InvalidHex { field: String, reason: String },

    #[error("Invalid number format: {0}")]
    InvalidNumber(String),

    #[error("SCALE decoding error: {0}")]
    ScaleDecodeError(String),
}

/// Hash of a header as returned by `chain_getHeader`.
///
/// The node does not include the hash itself, so the header is SCALE
/// encoded again and hashed with Blake2b-256.
pub fn compute_block_hash_from_header_json(header_json: &Value) -> Result<HexHash, HashError> {
    let header = Header::<u32, BlakeTwo256> {
        parent_hash: extract_hash(header_json, "parentHash")?.0,
        number: extract_block_number(header_json, "number")?,
        state_root: extract_hash(header_json, "stateRoot")?.0,
        extrinsics_root: extract_hash(header_json, "extrinsicsRoot")?.0,
        digest: extract_digest(header_json)?,
    };

    Ok(HexHash::from(sp_core::blake2_256(&header.encode())))
}

pub fn extract_hash(json: &Value, field: &str) -> Result<HexHash, HashError> {
    json.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| HashError::MissingField(field.to_string()))?
        .parse()
        .map_err(|e: crate::types::HexHashParseError| HashError::InvalidHex {
            field: field.to_string(),
            reason: e.to_string(),
        })
}

/// Header numbers must fit the runtime's `u32` block number.
pub fn extract_block_number(json: &Value, field: &str) -> Result<u32, HashError> {
    let value = json
        .get(field)
        .ok_or_else(|| HashError::MissingField(field.to_string()))?;

    let number = parse_block_number_from_json(value).map_err(HashError::InvalidNumber)?;
    u32::try_from(number).map_err(|_| HashError::InvalidNumber(format!("{} exceeds u32", number)))
}

/// Accepts `"0x1a2b"` as sent by full nodes and plain numbers as sent by
/// light clients.
pub fn parse_block_number_from_json(value: &Value) -> Result<u64, String> {
    match value {
        Value::String(s) => {
            let digits = s.strip_prefix("0x").unwrap_or(s);
            u64::from_str_radix(digits, 16).map_err(|e| format!("invalid hex '{}': {}", s, e))
        }
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| format!("{} is not an unsigned integer", n)),
        other => Err(format!("expected hex string or number, got: {}", other)),
    }
}

fn extract_digest(json: &Value) -> Result<Digest, HashError> {
    let logs = json
        .pointer("/digest/logs")
        .and_then(Value::as_array)
        .ok_or_else(|| HashError::MissingField("digest.logs".to_string()))?;

    let logs = logs
        .iter()
        .map(|log| {
            let bytes = log
                .as_str()
                .ok_or_else(|| "not a string".to_string())
                .and_then(|s| decode_hex(s).map_err(|e| e.to_string()))
                .map_err(|reason| HashError::InvalidHex {
                    field: "digest.logs".to_string(),
                    reason,
                })?;
            DigestItem::decode(&mut &bytes[..])
                .map_err(|e| HashError::ScaleDecodeError(format!("digest item: {}", e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Digest { logs })
}
