// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Runtime calls the bridge can build, their SCALE argument layouts and
//! the metadata-derived index table used to prefix them.

use super::BuildError;
use crate::types::{
    Amount, NominateOperatorParams, OperatorParams, RegisterOperatorParams, TransferParams,
    WithdrawStakeParams,
};
use crate::utils::decode_hex;
use parity_scale_codec::{Decode, Encode};
use sp_core::crypto::{AccountId32, Ss58Codec};
use sp_runtime::{MultiAddress, Percent};
use std::collections::HashMap;
use std::fmt;

pub type Address = MultiAddress<AccountId32, ()>;

/// Calls the payload builders know how to encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallName {
    BalancesTransfer,
    DomainsRegisterOperator,
    DomainsDeregisterOperator,
    DomainsNominateOperator,
    DomainsWithdrawStake,
}

impl CallName {
    pub const ALL: [CallName; 5] = [
        CallName::BalancesTransfer,
        CallName::DomainsRegisterOperator,
        CallName::DomainsDeregisterOperator,
        CallName::DomainsNominateOperator,
        CallName::DomainsWithdrawStake,
    ];

    pub fn pallet(self) -> &'static str {
        match self {
            CallName::BalancesTransfer => "Balances",
            _ => "Domains",
        }
    }

    /// Call names to look up in the pallet, in order of preference.
    ///
    /// Runtimes predating `transfer_allow_death` only expose `transfer`.
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            CallName::BalancesTransfer => &["transfer_allow_death", "transfer"],
            CallName::DomainsRegisterOperator => &["register_operator"],
            CallName::DomainsDeregisterOperator => &["deregister_operator"],
            CallName::DomainsNominateOperator => &["nominate_operator"],
            CallName::DomainsWithdrawStake => &["withdraw_stake"],
        }
    }
}

impl fmt::Display for CallName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.pallet(), self.candidates()[0])
    }
}

/// Pallet and call index prefixing an encoded call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallIndex {
    pub pallet: u8,
    pub call: u8,
}

/// Call indices resolved from the runtime metadata of a connected chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallIndexTable {
    indices: HashMap<CallName, CallIndex>,
}

impl CallIndexTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: CallName, index: CallIndex) {
        self.indices.insert(name, index);
    }

    pub fn get(&self, name: CallName) -> Option<CallIndex> {
        self.indices.get(&name).copied()
    }

    pub fn name_of(&self, index: CallIndex) -> Option<CallName> {
        self.indices
            .iter()
            .find(|(_, candidate)| **candidate == index)
            .map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct TransferArgs {
    pub dest: Address,
    #[codec(compact)]
    pub value: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct OperatorConfig {
    pub signing_key: [u8; 32],
    pub minimum_nominator_stake: u128,
    pub nomination_tax: Percent,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct RegisterOperatorArgs {
    pub domain_id: u32,
    pub amount: u128,
    pub config: OperatorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct DeregisterOperatorArgs {
    pub operator_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct NominateOperatorArgs {
    pub operator_id: u64,
    pub amount: u128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub enum Withdraw {
    All,
    Some(u128),
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct WithdrawStakeArgs {
    pub operator_id: u64,
    pub withdraw: Withdraw,
}

/// A fully-typed runtime call, independent of any chain's index layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCall {
    Transfer(TransferArgs),
    RegisterOperator(RegisterOperatorArgs),
    DeregisterOperator(DeregisterOperatorArgs),
    NominateOperator(NominateOperatorArgs),
    WithdrawStake(WithdrawStakeArgs),
}

impl RuntimeCall {
    pub fn transfer(params: &TransferParams) -> Result<Self, BuildError> {
        Ok(RuntimeCall::Transfer(TransferArgs {
            dest: MultiAddress::Id(parse_account("to", &params.to)?),
            value: parse_amount("amount", &params.amount)?,
        }))
    }

    pub fn register_operator(params: &RegisterOperatorParams) -> Result<Self, BuildError> {
        let values = &params.values;
        let nomination_tax = if values.nomination_tax <= 100 {
            Percent::from_percent(values.nomination_tax)
        } else {
            return Err(BuildError::InvalidArgument {
                field: "values.nominationTax",
                reason: format!("{} is above 100", values.nomination_tax),
            });
        };

        Ok(RuntimeCall::RegisterOperator(RegisterOperatorArgs {
            domain_id: parse_id("domainId", &params.domain_id)?,
            amount: parse_amount("amountToStake", &params.amount_to_stake)?,
            config: OperatorConfig {
                signing_key: parse_public_key("values.signingKey", &values.signing_key)?,
                minimum_nominator_stake: parse_amount(
                    "values.minimumNominatorStake",
                    &values.minimum_nominator_stake,
                )?,
                nomination_tax,
            },
        }))
    }

    pub fn deregister_operator(params: &OperatorParams) -> Result<Self, BuildError> {
        Ok(RuntimeCall::DeregisterOperator(DeregisterOperatorArgs {
            operator_id: parse_id("operatorId", &params.operator_id)?,
        }))
    }

    pub fn nominate_operator(params: &NominateOperatorParams) -> Result<Self, BuildError> {
        Ok(RuntimeCall::NominateOperator(NominateOperatorArgs {
            operator_id: parse_id("operatorId", &params.operator_id)?,
            amount: parse_amount("amount", &params.amount)?,
        }))
    }

    pub fn withdraw_stake(params: &WithdrawStakeParams) -> Result<Self, BuildError> {
        let withdraw = match &params.amount {
            Some(amount) => Withdraw::Some(parse_amount("amount", amount)?),
            None => Withdraw::All,
        };
        Ok(RuntimeCall::WithdrawStake(WithdrawStakeArgs {
            operator_id: parse_id("operatorId", &params.operator_id)?,
            withdraw,
        }))
    }

    pub fn name(&self) -> CallName {
        match self {
            RuntimeCall::Transfer(_) => CallName::BalancesTransfer,
            RuntimeCall::RegisterOperator(_) => CallName::DomainsRegisterOperator,
            RuntimeCall::DeregisterOperator(_) => CallName::DomainsDeregisterOperator,
            RuntimeCall::NominateOperator(_) => CallName::DomainsNominateOperator,
            RuntimeCall::WithdrawStake(_) => CallName::DomainsWithdrawStake,
        }
    }

    /// `pallet_index ++ call_index ++ SCALE(args)`.
    pub fn encode_with(&self, index: CallIndex) -> Vec<u8> {
        let mut out = vec![index.pallet, index.call];
        match self {
            RuntimeCall::Transfer(args) => args.encode_to(&mut out),
            RuntimeCall::RegisterOperator(args) => args.encode_to(&mut out),
            RuntimeCall::DeregisterOperator(args) => args.encode_to(&mut out),
            RuntimeCall::NominateOperator(args) => args.encode_to(&mut out),
            RuntimeCall::WithdrawStake(args) => args.encode_to(&mut out),
        }
        out
    }

    /// Decode an encoded call back into its typed form. Trailing bytes are
    /// rejected.
    pub fn decode_with(bytes: &[u8], table: &CallIndexTable) -> Result<Self, BuildError> {
        let [pallet, call, rest @ ..] = bytes else {
            return Err(BuildError::MalformedPayload(
                "call is shorter than its index".to_string(),
            ));
        };
        let index = CallIndex {
            pallet: *pallet,
            call: *call,
        };
        let name = table.name_of(index).ok_or_else(|| {
            BuildError::MalformedPayload(format!("unknown call index {}:{}", pallet, call))
        })?;

        let mut input = rest;
        let decoded = match name {
            CallName::BalancesTransfer => TransferArgs::decode(&mut input).map(Self::Transfer),
            CallName::DomainsRegisterOperator => {
                RegisterOperatorArgs::decode(&mut input).map(Self::RegisterOperator)
            }
            CallName::DomainsDeregisterOperator => {
                DeregisterOperatorArgs::decode(&mut input).map(Self::DeregisterOperator)
            }
            CallName::DomainsNominateOperator => {
                NominateOperatorArgs::decode(&mut input).map(Self::NominateOperator)
            }
            CallName::DomainsWithdrawStake => {
                WithdrawStakeArgs::decode(&mut input).map(Self::WithdrawStake)
            }
        }
        .map_err(|e| BuildError::MalformedPayload(format!("{}: {}", name, e)))?;

        if !input.is_empty() {
            return Err(BuildError::MalformedPayload(format!(
                "{} trailing bytes after {}",
                input.len(),
                name
            )));
        }
        Ok(decoded)
    }
}

/// SS58 (any network prefix) or 32 bytes of `0x`-hex.
pub fn parse_account(field: &'static str, value: &str) -> Result<AccountId32, BuildError> {
    if value.starts_with("0x") {
        return parse_public_key(field, value).map(AccountId32::from);
    }
    AccountId32::from_ss58check_with_version(value)
        .map(|(account, _)| account)
        .map_err(|e| BuildError::InvalidArgument {
            field,
            reason: format!("not a valid SS58 address: {:?}", e),
        })
}

fn parse_public_key(field: &'static str, value: &str) -> Result<[u8; 32], BuildError> {
    if !value.starts_with("0x") {
        return parse_account(field, value).map(Into::into);
    }
    let bytes = decode_hex(value).map_err(|e| BuildError::InvalidArgument {
        field,
        reason: e.to_string(),
    })?;
    <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| BuildError::InvalidArgument {
        field,
        reason: format!("expected 32 bytes, got {}", bytes.len()),
    })
}

fn parse_amount(field: &'static str, amount: &Amount) -> Result<u128, BuildError> {
    amount
        .as_str()
        .parse::<u128>()
        .map_err(|e| BuildError::InvalidArgument {
            field,
            reason: format!("'{}' is not a u128 amount: {}", amount, e),
        })
}

fn parse_id<T>(field: &'static str, value: &str) -> Result<T, BuildError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value.parse::<T>().map_err(|e| BuildError::InvalidArgument {
        field,
        reason: format!("'{}': {}", value, e),
    })
}
