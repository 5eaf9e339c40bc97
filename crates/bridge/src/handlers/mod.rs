// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod account;
pub mod block;
pub mod configure;
pub mod payload;
pub mod send;
pub mod sign;

use crate::custody::KeyCustody;
use crate::error::BridgeError;
use crate::payload::{BuildError, RuntimeCall};
use crate::state::ChainContext;
use crate::types::ChainRequest;
use crate::utils::BlockId;
use send::PreparedSend;
use serde::Serialize;
use serde_json::Value;

/// A chain request with everything that can be checked offline already
/// checked, so a bad argument never costs a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainJob {
    Build(RuntimeCall),
    Send(PreparedSend),
    GetBalance,
    GetBlock(BlockId),
    GetChainHead,
}

impl ChainJob {
    pub fn prepare(request: ChainRequest) -> Result<Self, BridgeError> {
        let job = match request {
            ChainRequest::Transfer(params) => Self::Build(RuntimeCall::transfer(&params)?),
            ChainRequest::RegisterOperator(params) => {
                Self::Build(RuntimeCall::register_operator(&params)?)
            }
            ChainRequest::DeregisterOperator(params) => {
                Self::Build(RuntimeCall::deregister_operator(&params)?)
            }
            ChainRequest::NominateOperator(params) => {
                Self::Build(RuntimeCall::nominate_operator(&params)?)
            }
            ChainRequest::WithdrawStake(params) => {
                Self::Build(RuntimeCall::withdraw_stake(&params)?)
            }
            ChainRequest::Send(params) => Self::Send(PreparedSend::prepare(&params)?),
            ChainRequest::GetBalance => Self::GetBalance,
            ChainRequest::GetBlock(params) => {
                let id = params.block_tag.parse::<BlockId>().map_err(|e| {
                    BuildError::InvalidArgument {
                        field: "blockTag",
                        reason: e.to_string(),
                    }
                })?;
                Self::GetBlock(id)
            }
            ChainRequest::GetChainHead => Self::GetChainHead,
        };
        Ok(job)
    }

    pub async fn run(
        &self,
        ctx: &ChainContext<'_>,
        custody: &dyn KeyCustody,
    ) -> Result<Value, BridgeError> {
        match self {
            Self::Build(call) => to_value(&payload::build_payload(ctx, custody, call).await?),
            Self::Send(prepared) => to_value(&prepared.submit(ctx, custody).await?),
            Self::GetBalance => to_value(&account::get_balance(ctx, custody).await?),
            Self::GetBlock(id) => to_value(&block::get_block(ctx, id).await?),
            Self::GetChainHead => to_value(&block::get_chain_head(ctx).await?),
        }
    }
}

pub(crate) fn to_value<T: Serialize>(value: &T) -> Result<Value, BridgeError> {
    serde_json::to_value(value)
        .map_err(|e| BuildError::MalformedPayload(format!("response: {}", e)).into())
}
