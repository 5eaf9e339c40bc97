// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::chain::{Block, reader};
use crate::error::BridgeError;
use crate::state::ChainContext;
use crate::types::HexHash;
use crate::utils::BlockId;

pub async fn get_block(ctx: &ChainContext<'_>, id: &BlockId) -> Result<Block, BridgeError> {
    Ok(reader::block(ctx, id).await?)
}

/// Hash of the latest finalized block.
pub async fn get_chain_head(ctx: &ChainContext<'_>) -> Result<HexHash, BridgeError> {
    Ok(reader::chain_head(ctx).await?)
}
