// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Signing through key custody. Neither operation needs the chain.

use crate::custody::KeyCustody;
use crate::error::BridgeError;
use crate::payload::BuildError;
use crate::types::{SignJsonParams, SignRawParams};
use crate::utils::{decode_hex, to_hex};
use serde::Serialize;

/// MultiSignature tag of sr25519 signatures.
const SR25519_TAG: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureResponse {
    pub signature: String,
}

/// Sign a JSON signer payload. The signature carries its MultiSignature
/// tag so it can be placed into an extrinsic directly.
pub async fn sign_payload_json(
    custody: &dyn KeyCustody,
    params: &SignJsonParams,
) -> Result<SignatureResponse, BridgeError> {
    let message = params.payload.signing_bytes()?;
    let signature = custody.sign(&message).await?;

    let mut tagged = Vec::with_capacity(65);
    tagged.push(SR25519_TAG);
    tagged.extend_from_slice(&signature);
    Ok(SignatureResponse {
        signature: to_hex(&tagged),
    })
}

/// Sign raw hex data exactly as given and return the bare 64-byte
/// signature. `type` does not change what is signed.
pub async fn sign_payload_raw(
    custody: &dyn KeyCustody,
    params: &SignRawParams,
) -> Result<SignatureResponse, BridgeError> {
    let data = decode_hex(&params.payload.data)
        .map_err(|e| BuildError::MalformedPayload(format!("data: {}", e)))?;

    let signature = custody.sign(&data).await?;
    Ok(SignatureResponse {
        signature: to_hex(&signature),
    })
}
