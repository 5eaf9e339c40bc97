// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Extrinsic framing: the unsigned `tx` handed out with a payload and the
//! signed form submitted by the broadcaster.

use super::BuildError;
use super::call::Address;
use super::signer_payload::{EXTRINSIC_VERSION, ExtrinsicPayload};
use crate::utils::decode_hex;
use parity_scale_codec::{Compact, Decode, Encode};
use sp_core::crypto::AccountId32;
use sp_runtime::MultiAddress;

const SIGNED_BIT: u8 = 0b1000_0000;

/// MultiSignature variant tags.
const ED25519: u8 = 0;
const SR25519: u8 = 1;
const ECDSA: u8 = 2;

/// `Compact(len) ++ version ++ call`.
pub fn encode_unsigned(call: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(call.len() + 1);
    body.push(EXTRINSIC_VERSION);
    body.extend_from_slice(call);
    body.encode()
}

/// Strip the framing from an unsigned extrinsic and return the call bytes.
pub fn decode_unsigned(tx: &[u8]) -> Result<Vec<u8>, BuildError> {
    let mut input = tx;
    let body = Vec::<u8>::decode(&mut input)
        .map_err(|e| BuildError::MalformedPayload(format!("tx: {}", e)))?;
    if !input.is_empty() {
        return Err(BuildError::MalformedPayload(
            "tx: length prefix does not cover the extrinsic".to_string(),
        ));
    }

    match body.split_first() {
        Some((&EXTRINSIC_VERSION, call)) => Ok(call.to_vec()),
        Some((&version, _)) if version & SIGNED_BIT != 0 => Err(BuildError::MalformedPayload(
            "tx: expected an unsigned extrinsic".to_string(),
        )),
        Some((&version, _)) => Err(BuildError::UnsupportedExtrinsicVersion(version)),
        None => Err(BuildError::MalformedPayload("tx: empty extrinsic".to_string())),
    }
}

/// Decode a hex signature into its MultiSignature encoding.
///
/// Bare 64-byte signatures are sr25519. Longer ones must already carry a
/// variant tag matching their length.
pub fn parse_signature(signature: &str) -> Result<Vec<u8>, BuildError> {
    let bytes =
        decode_hex(signature).map_err(|e| BuildError::InvalidSignature(e.to_string()))?;

    match (bytes.len(), bytes.first()) {
        (64, _) => {
            let mut tagged = Vec::with_capacity(65);
            tagged.push(SR25519);
            tagged.extend_from_slice(&bytes);
            Ok(tagged)
        }
        (65, Some(&ED25519 | &SR25519)) | (66, Some(&ECDSA)) => Ok(bytes),
        (len, _) => Err(BuildError::InvalidSignature(format!(
            "unsupported signature of {} bytes",
            len
        ))),
    }
}

/// `Compact(len) ++ (SIGNED_BIT | version) ++ address ++ signature ++ era ++
/// Compact(nonce) ++ Compact(tip) ++ call`.
pub fn encode_signed(signer: [u8; 32], signature: &[u8], payload: &ExtrinsicPayload) -> Vec<u8> {
    let address: Address = MultiAddress::Id(AccountId32::from(signer));

    let mut body = vec![SIGNED_BIT | EXTRINSIC_VERSION];
    address.encode_to(&mut body);
    body.extend_from_slice(signature);
    payload.era.encode_to(&mut body);
    Compact(payload.nonce).encode_to(&mut body);
    Compact(payload.tip).encode_to(&mut body);
    body.extend_from_slice(&payload.method);
    body.encode()
}
