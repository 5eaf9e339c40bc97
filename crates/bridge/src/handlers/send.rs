// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Broadcaster: pairs a signature with the payload it was made over and
//! submits the signed extrinsic.

use crate::custody::KeyCustody;
use crate::error::BridgeError;
use crate::payload::extrinsic::{encode_signed, parse_signature};
use crate::payload::{self, BuildError, ExtrinsicPayload};
use crate::state::ChainContext;
use crate::types::{HexHash, SendParams};
use crate::utils::to_hex;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendResponse {
    pub hash: HexHash,
    pub sender: String,
}

/// A send request decoded and cross-checked without touching the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSend {
    signature: Vec<u8>,
    payload: ExtrinsicPayload,
}

impl PreparedSend {
    pub fn prepare(params: &SendParams) -> Result<Self, BuildError> {
        let signature = parse_signature(&params.signature)?;
        payload::check_consistency(&params.tx_payload)?;
        let payload = params.tx_payload.payload.parse()?;
        Ok(Self { signature, payload })
    }

    pub async fn submit(
        &self,
        ctx: &ChainContext<'_>,
        custody: &dyn KeyCustody,
    ) -> Result<SendResponse, BridgeError> {
        // A payload from before a network switch would only be rejected
        // by the new chain
        if self.payload.genesis_hash != ctx.client.genesis_hash() {
            return Err(BuildError::MalformedPayload(format!(
                "payload was built for genesis {}, connected to {}",
                self.payload.genesis_hash,
                ctx.client.genesis_hash()
            ))
            .into());
        }

        let signer = custody.public_key().await?;
        let extrinsic = encode_signed(signer, &self.signature, &self.payload);
        let hash = ctx.client.submit_extrinsic(&to_hex(&extrinsic)).await?;
        let sender = custody.address(ctx.configuration.address_prefix).await?;

        tracing::info!(%hash, %sender, "Submitted extrinsic");
        Ok(SendResponse { hash, sender })
    }
}
