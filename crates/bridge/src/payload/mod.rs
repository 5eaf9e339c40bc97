// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deterministic construction of unsigned extrinsics and their signer
//! payloads from a chain snapshot.

pub mod call;
pub mod extrinsic;
pub mod signer_payload;

pub use call::{CallIndex, CallIndexTable, CallName, RuntimeCall};
pub use signer_payload::{
    DEFAULT_ERA_PERIOD, EXTRINSIC_VERSION, EraDescriptor, ExtrinsicPayload, PLACEHOLDER_ADDRESS,
    SignerPayload, SignerPayloadJson,
};

use crate::chain::ChainSnapshot;
use crate::utils::{decode_hex, to_hex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    #[error("Chain snapshot is missing {0}")]
    IncompleteSnapshot(&'static str),

    #[error("Unsupported extrinsic version {0}")]
    UnsupportedExtrinsicVersion(u8),

    #[error("Runtime does not expose {0}")]
    CallUnavailable(CallName),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Payload method and tx encode different calls")]
    MethodMismatch,
}

/// Unsigned extrinsic together with the payload a signer consumes.
///
/// Both halves are derived from the same encoded call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxPayload {
    pub payload: SignerPayloadJson,
    pub tx: String,
}

pub fn build(
    call: &RuntimeCall,
    snapshot: &ChainSnapshot,
    calls: &CallIndexTable,
) -> Result<TxPayload, BuildError> {
    if snapshot.block_hash.is_zero() {
        return Err(BuildError::IncompleteSnapshot("blockHash"));
    }
    if snapshot.genesis_hash.is_zero() {
        return Err(BuildError::IncompleteSnapshot("genesisHash"));
    }
    if snapshot.extrinsic_version != EXTRINSIC_VERSION {
        return Err(BuildError::UnsupportedExtrinsicVersion(
            snapshot.extrinsic_version,
        ));
    }

    let index = calls
        .get(call.name())
        .ok_or(BuildError::CallUnavailable(call.name()))?;
    let method = call.encode_with(index);
    let tx = to_hex(&extrinsic::encode_unsigned(&method));
    let payload = SignerPayload::new(snapshot, method).to_json();

    Ok(TxPayload { payload, tx })
}

/// Check that `tx` and `payload.method` carry the same call and return it.
pub fn check_consistency(tx_payload: &TxPayload) -> Result<Vec<u8>, BuildError> {
    let tx = decode_hex(&tx_payload.tx)
        .map_err(|e| BuildError::MalformedPayload(format!("tx: {}", e)))?;
    let from_tx = extrinsic::decode_unsigned(&tx)?;
    let from_payload = decode_hex(&tx_payload.payload.method)
        .map_err(|e| BuildError::MalformedPayload(format!("method: {}", e)))?;

    if from_tx != from_payload {
        return Err(BuildError::MethodMismatch);
    }
    Ok(from_tx)
}
