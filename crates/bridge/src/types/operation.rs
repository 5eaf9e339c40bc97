// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Operations accepted by the dispatcher and their validated parameter records.

use crate::payload::{SignerPayloadJson, TxPayload};
use config::ConfigurationRequest;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every operation the RPC surface understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Transfer,
    RegisterOperator,
    DeregisterOperator,
    NominateOperator,
    WithdrawStake,
    SignJson,
    SignRaw,
    Send,
    GetBalance,
    GetBlock,
    GetAddress,
    GetPublicKey,
    ExportSeed,
    GetAllTransactions,
    Configure,
    GetChainHead,
}

impl Operation {
    pub const ALL: [Operation; 16] = [
        Operation::Transfer,
        Operation::RegisterOperator,
        Operation::DeregisterOperator,
        Operation::NominateOperator,
        Operation::WithdrawStake,
        Operation::SignJson,
        Operation::SignRaw,
        Operation::Send,
        Operation::GetBalance,
        Operation::GetBlock,
        Operation::GetAddress,
        Operation::GetPublicKey,
        Operation::ExportSeed,
        Operation::GetAllTransactions,
        Operation::Configure,
        Operation::GetChainHead,
    ];

    /// Wire name of the operation.
    pub fn method(self) -> &'static str {
        match self {
            Operation::Transfer => "generateTransactionPayload",
            Operation::RegisterOperator => "generateRegisterOperatorPayload",
            Operation::DeregisterOperator => "generateDeregisterOperatorPayload",
            Operation::NominateOperator => "generateNominateOperatorPayload",
            Operation::WithdrawStake => "generateWithdrawStakePayload",
            Operation::SignJson => "signPayloadJSON",
            Operation::SignRaw => "signPayloadRaw",
            Operation::Send => "send",
            Operation::GetBalance => "getBalance",
            Operation::GetBlock => "getBlock",
            Operation::GetAddress => "getAddress",
            Operation::GetPublicKey => "getPublicKey",
            Operation::ExportSeed => "exportSeed",
            Operation::GetAllTransactions => "getAllTransactions",
            Operation::Configure => "configure",
            Operation::GetChainHead => "getChainHead",
        }
    }

    pub fn from_method(method: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.method() == method)
    }

    /// Static allow-list of operations that need a live chain connection.
    ///
    /// Everything else runs without touching the chain, so it keeps working
    /// while the node is unreachable.
    pub fn requires_chain(self) -> bool {
        matches!(
            self,
            Operation::Transfer
                | Operation::RegisterOperator
                | Operation::DeregisterOperator
                | Operation::NominateOperator
                | Operation::WithdrawStake
                | Operation::Send
                | Operation::GetBalance
                | Operation::GetBlock
                | Operation::GetChainHead
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

/// Chain amount in its canonical decimal string form.
///
/// Numeric input is coerced to this form by the validator so values beyond
/// the safe-integer range survive unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
    /// Accepts only non-empty strings of ASCII digits.
    pub fn from_decimal(value: &str) -> Option<Self> {
        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(value.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferParams {
    pub to: String,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorValues {
    pub signing_key: String,
    pub minimum_nominator_stake: Amount,
    pub nomination_tax: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOperatorParams {
    pub domain_id: String,
    pub amount_to_stake: Amount,
    pub values: OperatorValues,
}

/// Shared by deregister-operator requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorParams {
    pub operator_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NominateOperatorParams {
    pub operator_id: String,
    pub amount: Amount,
}

/// `amount` absent means withdrawing the whole stake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawStakeParams {
    pub operator_id: String,
    pub amount: Option<Amount>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignJsonParams {
    pub payload: SignerPayloadJson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawPayloadKind {
    Bytes,
    Payload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerPayloadRaw {
    pub address: String,
    pub data: String,
    #[serde(rename = "type")]
    pub kind: RawPayloadKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignRawParams {
    pub payload: SignerPayloadRaw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendParams {
    pub signature: String,
    pub tx_payload: TxPayload,
}

/// `block_tag` is kept as text. Numeric input is coerced to its decimal
/// form and the value is only resolved to a block when the job is prepared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetBlockParams {
    pub block_tag: String,
}

/// Requests that need a live chain connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainRequest {
    Transfer(TransferParams),
    RegisterOperator(RegisterOperatorParams),
    DeregisterOperator(OperatorParams),
    NominateOperator(NominateOperatorParams),
    WithdrawStake(WithdrawStakeParams),
    Send(SendParams),
    GetBalance,
    GetBlock(GetBlockParams),
    GetChainHead,
}

/// Requests served from key custody, the indexer or the persisted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalRequest {
    SignJson(SignJsonParams),
    SignRaw(SignRawParams),
    GetAddress,
    GetPublicKey,
    ExportSeed,
    GetAllTransactions,
    Configure(ConfigurationRequest),
}

/// A validated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Chain(ChainRequest),
    Local(LocalRequest),
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Request::Chain(request) => match request {
                ChainRequest::Transfer(_) => Operation::Transfer,
                ChainRequest::RegisterOperator(_) => Operation::RegisterOperator,
                ChainRequest::DeregisterOperator(_) => Operation::DeregisterOperator,
                ChainRequest::NominateOperator(_) => Operation::NominateOperator,
                ChainRequest::WithdrawStake(_) => Operation::WithdrawStake,
                ChainRequest::Send(_) => Operation::Send,
                ChainRequest::GetBalance => Operation::GetBalance,
                ChainRequest::GetBlock(_) => Operation::GetBlock,
                ChainRequest::GetChainHead => Operation::GetChainHead,
            },
            Request::Local(request) => match request {
                LocalRequest::SignJson(_) => Operation::SignJson,
                LocalRequest::SignRaw(_) => Operation::SignRaw,
                LocalRequest::GetAddress => Operation::GetAddress,
                LocalRequest::GetPublicKey => Operation::GetPublicKey,
                LocalRequest::ExportSeed => Operation::ExportSeed,
                LocalRequest::GetAllTransactions => Operation::GetAllTransactions,
                LocalRequest::Configure(_) => Operation::Configure,
            },
        }
    }
}
