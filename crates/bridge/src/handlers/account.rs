// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::chain::{TransactionIndexer, TransactionRecord, reader};
use crate::custody::KeyCustody;
use crate::error::BridgeError;
use crate::state::ChainContext;
use crate::utils::to_hex;
use config::Configuration;
use serde::Serialize;
use sp_core::crypto::AccountId32;

/// Balances as decimal strings, since they routinely exceed 2^53.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceResponse {
    pub free: String,
    pub reserved: String,
    pub frozen: String,
}

pub async fn get_address(
    custody: &dyn KeyCustody,
    configuration: &Configuration,
) -> Result<String, BridgeError> {
    Ok(custody.address(configuration.address_prefix).await?)
}

pub async fn get_public_key(custody: &dyn KeyCustody) -> Result<String, BridgeError> {
    Ok(to_hex(&custody.public_key().await?))
}

pub async fn export_seed(custody: &dyn KeyCustody) -> Result<String, BridgeError> {
    Ok(custody.export_seed().await?)
}

pub async fn get_balance(
    ctx: &ChainContext<'_>,
    custody: &dyn KeyCustody,
) -> Result<BalanceResponse, BridgeError> {
    let account = AccountId32::from(custody.public_key().await?);
    let balance = reader::balance(ctx, &account).await?;
    Ok(BalanceResponse {
        free: balance.free.to_string(),
        reserved: balance.reserved.to_string(),
        frozen: balance.frozen.to_string(),
    })
}

pub async fn get_all_transactions(
    indexer: &dyn TransactionIndexer,
    custody: &dyn KeyCustody,
    configuration: &Configuration,
) -> Result<Vec<TransactionRecord>, BridgeError> {
    let address = custody.address(configuration.address_prefix).await?;
    Ok(reader::account_transactions(indexer, configuration, &address).await?)
}
