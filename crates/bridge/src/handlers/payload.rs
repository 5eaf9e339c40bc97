// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Payload building shared by the five payload operations.

use crate::chain::reader;
use crate::custody::KeyCustody;
use crate::error::BridgeError;
use crate::payload::{self, RuntimeCall, TxPayload};
use crate::state::ChainContext;

/// Build `call` against a snapshot captured for this request alone.
pub async fn build_payload(
    ctx: &ChainContext<'_>,
    custody: &dyn KeyCustody,
    call: &RuntimeCall,
) -> Result<TxPayload, BridgeError> {
    let snapshot = reader::snapshot(ctx, custody).await?;
    let tx_payload = payload::build(call, &snapshot, ctx.client.calls())?;

    tracing::debug!(
        call = %call.name(),
        block_number = snapshot.block_number,
        nonce = snapshot.account_nonce,
        "Built transaction payload"
    );
    Ok(tx_payload)
}
