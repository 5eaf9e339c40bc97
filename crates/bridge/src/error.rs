// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::chain::ChainError;
use crate::custody::CustodyError;
use crate::payload::BuildError;
use crate::store::StoreError;
use crate::validation::SchemaError;
use thiserror::Error;

/// Failure of one request, classified for the caller.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Method '{0}' is not supported")]
    UnsupportedOperation(String),

    #[error("Chain unavailable: {0}")]
    ChainUnavailable(#[from] ChainError),

    #[error("Failed to build payload: {0}")]
    Build(#[from] BuildError),

    #[error("Key custody error: {0}")]
    Custody(#[from] CustodyError),

    #[error("State store error: {0}")]
    Store(#[from] StoreError),
}

impl BridgeError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::Schema(_) => "SchemaError",
            BridgeError::UnsupportedOperation(_) => "UnsupportedOperationError",
            BridgeError::ChainUnavailable(_) => "ChainUnavailableError",
            BridgeError::Build(_) => "BuildError",
            BridgeError::Custody(_) => "KeyCustodyError",
            BridgeError::Store(_) => "StateStoreError",
        }
    }
}

/// A [`BridgeError`] tagged with the operation that raised it.
#[derive(Debug, Error)]
#[error("{operation}: {source}")]
pub struct DispatchError {
    pub operation: String,
    #[source]
    pub source: BridgeError,
}

impl DispatchError {
    pub fn new(operation: impl Into<String>, source: BridgeError) -> Self {
        Self {
            operation: operation.into(),
            source,
        }
    }

    pub fn code(&self) -> &'static str {
        self.source.code()
    }
}
