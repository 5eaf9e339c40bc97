// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod hash;
pub mod operation;

pub use hash::{HexHash, HexHashParseError};
pub use operation::{
    Amount, ChainRequest, GetBlockParams, LocalRequest, NominateOperatorParams, OperatorParams,
    OperatorValues, Operation, RawPayloadKind, RegisterOperatorParams, Request, SendParams,
    SignJsonParams, SignRawParams, SignerPayloadRaw, TransferParams, WithdrawStakeParams,
};
