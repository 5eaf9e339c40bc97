// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-operation parameter schemas, checked before any other work.
//!
//! Fields are checked in declaration order and the first violation is
//! reported. Unknown keys are rejected except inside signer payloads,
//! which signer extensions are free to extend.

use crate::payload::{SignerPayloadJson, TxPayload};
use crate::types::{
    Amount, ChainRequest, GetBlockParams, LocalRequest, NominateOperatorParams, Operation,
    OperatorParams, OperatorValues, RawPayloadKind, RegisterOperatorParams, Request, SendParams,
    SignJsonParams, SignRawParams, SignerPayloadRaw, TransferParams, WithdrawStakeParams,
};
use config::{ConfigurationRequest, Unit};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid parameter '{field}': {reason}")]
pub struct SchemaError {
    pub field: String,
    pub reason: String,
}

impl SchemaError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, "is required")
    }
}

/// Check `params` against the schema of `operation`.
pub fn validate(operation: Operation, params: Option<&Value>) -> Result<Request, SchemaError> {
    let request = match operation {
        Operation::Transfer => {
            let mut p = Fields::root(params)?;
            let params = TransferParams {
                to: p.string("to")?,
                amount: p.amount("amount")?,
            };
            p.finish()?;
            Request::Chain(ChainRequest::Transfer(params))
        }
        Operation::RegisterOperator => {
            let mut p = Fields::root(params)?;
            let domain_id = p.string("domainId")?;
            let amount_to_stake = p.amount("amountToStake")?;
            let mut v = p.object("values")?;
            let values = OperatorValues {
                signing_key: v.string("signingKey")?,
                minimum_nominator_stake: v.amount("minimumNominatorStake")?,
                nomination_tax: v.percent("nominationTax")?,
            };
            v.finish()?;
            p.finish()?;
            Request::Chain(ChainRequest::RegisterOperator(RegisterOperatorParams {
                domain_id,
                amount_to_stake,
                values,
            }))
        }
        Operation::DeregisterOperator => {
            let mut p = Fields::root(params)?;
            let params = OperatorParams {
                operator_id: p.string("operatorId")?,
            };
            p.finish()?;
            Request::Chain(ChainRequest::DeregisterOperator(params))
        }
        Operation::NominateOperator => {
            let mut p = Fields::root(params)?;
            let params = NominateOperatorParams {
                operator_id: p.string("operatorId")?,
                amount: p.amount("amount")?,
            };
            p.finish()?;
            Request::Chain(ChainRequest::NominateOperator(params))
        }
        Operation::WithdrawStake => {
            let mut p = Fields::root(params)?;
            let params = WithdrawStakeParams {
                operator_id: p.string("operatorId")?,
                amount: p.optional_amount("amount")?,
            };
            p.finish()?;
            Request::Chain(ChainRequest::WithdrawStake(params))
        }
        Operation::SignJson => {
            let mut p = Fields::root(params)?;
            let payload = signer_payload(p.object("payload")?)?;
            p.finish()?;
            Request::Local(LocalRequest::SignJson(SignJsonParams { payload }))
        }
        Operation::SignRaw => {
            let mut p = Fields::root(params)?;
            let mut raw = p.object("payload")?;
            let payload = SignerPayloadRaw {
                address: raw.string("address")?,
                data: raw.string("data")?,
                kind: raw.raw_kind("type")?,
            };
            raw.finish()?;
            p.finish()?;
            Request::Local(LocalRequest::SignRaw(SignRawParams { payload }))
        }
        Operation::Send => {
            let mut p = Fields::root(params)?;
            let signature = p.string("signature")?;
            let mut tx_payload = p.object("txPayload")?;
            let payload = signer_payload(tx_payload.object("payload")?)?;
            let tx = tx_payload.string("tx")?;
            tx_payload.finish()?;
            p.finish()?;
            Request::Chain(ChainRequest::Send(SendParams {
                signature,
                tx_payload: TxPayload { payload, tx },
            }))
        }
        Operation::GetBlock => {
            let mut p = Fields::root(params)?;
            let block_tag = p.string_or_integer("blockTag")?;
            p.finish()?;
            Request::Chain(ChainRequest::GetBlock(GetBlockParams { block_tag }))
        }
        Operation::Configure => {
            let mut p = Fields::root(params)?;
            let mut c = p.object("configuration")?;
            let network_name = c.string("networkName")?;
            let ws_rpc_url = c.optional_string("wsRpcUrl")?;
            let address_prefix = c.optional_u16("addressPrefix")?;
            let unit = match c.optional_object("unit")? {
                Some(mut u) => {
                    let unit = Unit {
                        symbol: u.string("symbol")?,
                        image: u.string("image")?,
                    };
                    u.finish()?;
                    Some(unit)
                }
                None => None,
            };
            let indexer_url = c.optional_string("indexerUrl")?;
            c.finish()?;
            p.finish()?;
            Request::Local(LocalRequest::Configure(ConfigurationRequest {
                network_name,
                ws_rpc_url,
                address_prefix,
                unit,
                indexer_url,
            }))
        }
        Operation::GetBalance => no_params(params, Request::Chain(ChainRequest::GetBalance))?,
        Operation::GetChainHead => no_params(params, Request::Chain(ChainRequest::GetChainHead))?,
        Operation::GetAddress => no_params(params, Request::Local(LocalRequest::GetAddress))?,
        Operation::GetPublicKey => no_params(params, Request::Local(LocalRequest::GetPublicKey))?,
        Operation::ExportSeed => no_params(params, Request::Local(LocalRequest::ExportSeed))?,
        Operation::GetAllTransactions => {
            no_params(params, Request::Local(LocalRequest::GetAllTransactions))?
        }
    };
    Ok(request)
}

fn no_params(params: Option<&Value>, request: Request) -> Result<Request, SchemaError> {
    match params {
        None | Some(Value::Null) | Some(Value::Object(_)) => Ok(request),
        Some(_) => Err(SchemaError::new("params", "must be an object")),
    }
}

/// Signer payloads allow extra keys.
fn signer_payload(mut p: Fields<'_>) -> Result<SignerPayloadJson, SchemaError> {
    Ok(SignerPayloadJson {
        address: p.string("address")?,
        block_hash: p.string("blockHash")?,
        block_number: p.string("blockNumber")?,
        era: p.string("era")?,
        genesis_hash: p.string("genesisHash")?,
        method: p.string("method")?,
        nonce: p.string("nonce")?,
        signed_extensions: p.string_array("signedExtensions")?,
        spec_version: p.string("specVersion")?,
        tip: p.string("tip")?,
        transaction_version: p.string("transactionVersion")?,
        version: p.u8("version")?,
    })
}

/// Cursor over one JSON object, recording the keys it has consumed.
struct Fields<'a> {
    path: String,
    object: &'a Map<String, Value>,
    seen: Vec<&'static str>,
}

impl<'a> Fields<'a> {
    fn root(params: Option<&'a Value>) -> Result<Self, SchemaError> {
        match params {
            Some(Value::Object(object)) => Ok(Self {
                path: String::new(),
                object,
                seen: Vec::new(),
            }),
            _ => Err(SchemaError::new("params", "must be an object")),
        }
    }

    fn field_path(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.path, name)
        }
    }

    fn get(&mut self, name: &'static str) -> Option<&'a Value> {
        self.seen.push(name);
        let object: &'a Map<String, Value> = self.object;
        object.get(name).filter(|v| !v.is_null())
    }

    fn require(&mut self, name: &'static str) -> Result<&'a Value, SchemaError> {
        self.get(name)
            .ok_or_else(|| SchemaError::missing(self.field_path(name)))
    }

    fn invalid(&self, name: &str, reason: &str) -> SchemaError {
        SchemaError::new(self.field_path(name), reason)
    }

    fn string(&mut self, name: &'static str) -> Result<String, SchemaError> {
        let value = self.require(name)?;
        self.as_string(name, value)
    }

    fn optional_string(&mut self, name: &'static str) -> Result<Option<String>, SchemaError> {
        self.get(name)
            .map(|value| self.as_string(name, value))
            .transpose()
    }

    fn as_string(&self, name: &str, value: &Value) -> Result<String, SchemaError> {
        match value.as_str() {
            Some("") => Err(self.invalid(name, "must not be empty")),
            Some(s) => Ok(s.to_string()),
            None => Err(self.invalid(name, "must be a string")),
        }
    }

    fn string_array(&mut self, name: &'static str) -> Result<Vec<String>, SchemaError> {
        let items = self
            .require(name)?
            .as_array()
            .ok_or_else(|| self.invalid(name, "must be an array of strings"))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.invalid(name, "must be an array of strings"))
            })
            .collect()
    }

    fn amount(&mut self, name: &'static str) -> Result<Amount, SchemaError> {
        let value = self.require(name)?;
        self.as_amount(name, value)
    }

    fn optional_amount(&mut self, name: &'static str) -> Result<Option<Amount>, SchemaError> {
        self.get(name)
            .map(|value| self.as_amount(name, value))
            .transpose()
    }

    /// Decimal strings pass through. Numbers are coerced to their decimal
    /// string form, which must be a non-negative integer.
    fn as_amount(&self, name: &str, value: &Value) -> Result<Amount, SchemaError> {
        let decimal = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => match (n.as_u64(), n.as_f64()) {
                (Some(n), _) => n.to_string(),
                (None, Some(f)) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 => {
                    format!("{:.0}", f)
                }
                _ => return Err(self.invalid(name, "must be a non-negative integer")),
            },
            _ => return Err(self.invalid(name, "must be a string or a number")),
        };
        Amount::from_decimal(&decimal)
            .ok_or_else(|| self.invalid(name, "must be a non-negative decimal integer"))
    }

    fn unsigned(&mut self, name: &'static str, max: u64) -> Result<u64, SchemaError> {
        self.require(name)?
            .as_u64()
            .filter(|n| *n <= max)
            .ok_or_else(|| self.invalid(name, &format!("must be an integer between 0 and {}", max)))
    }

    fn u8(&mut self, name: &'static str) -> Result<u8, SchemaError> {
        // Bounded by `unsigned`
        self.unsigned(name, u64::from(u8::MAX)).map(|n| n as u8)
    }

    fn percent(&mut self, name: &'static str) -> Result<u8, SchemaError> {
        self.unsigned(name, 100).map(|n| n as u8)
    }

    fn optional_u16(&mut self, name: &'static str) -> Result<Option<u16>, SchemaError> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .and_then(|n| u16::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| self.invalid(name, "must be an integer between 0 and 65535")),
        }
    }

    fn raw_kind(&mut self, name: &'static str) -> Result<RawPayloadKind, SchemaError> {
        match self.require(name)?.as_str() {
            Some("bytes") => Ok(RawPayloadKind::Bytes),
            Some("payload") => Ok(RawPayloadKind::Payload),
            _ => Err(self.invalid(name, "must be one of 'bytes', 'payload'")),
        }
    }

    /// Non-empty strings pass through untouched; non-negative integers are
    /// coerced to their decimal form.
    fn string_or_integer(&mut self, name: &'static str) -> Result<String, SchemaError> {
        let value = self.require(name)?;
        match value {
            Value::Number(n) => n
                .as_u64()
                .map(|n| n.to_string())
                .ok_or_else(|| self.invalid(name, "must be a non-negative integer")),
            _ => self.as_string(name, value),
        }
    }

    fn object(&mut self, name: &'static str) -> Result<Fields<'a>, SchemaError> {
        let value = self.require(name)?;
        self.as_object(name, value)
    }

    fn optional_object(&mut self, name: &'static str) -> Result<Option<Fields<'a>>, SchemaError> {
        self.get(name)
            .map(|value| self.as_object(name, value))
            .transpose()
    }

    fn as_object(&self, name: &str, value: &'a Value) -> Result<Fields<'a>, SchemaError> {
        let object = value
            .as_object()
            .ok_or_else(|| self.invalid(name, "must be an object"))?;
        Ok(Fields {
            path: self.field_path(name),
            object,
            seen: Vec::new(),
        })
    }

    /// Reject keys no schema field consumed.
    fn finish(self) -> Result<(), SchemaError> {
        match self
            .object
            .keys()
            .find(|key| !self.seen.iter().any(|seen| *seen == key.as_str()))
        {
            Some(unknown) => Err(self.invalid(unknown, "is not a known field")),
            None => Ok(()),
        }
    }
}
