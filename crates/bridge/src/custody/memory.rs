// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{CustodyError, KeyCustody};
use async_trait::async_trait;
use sp_core::{Pair, sr25519};

/// Key custody holding an sr25519 key derived from a secret phrase.
pub struct MemoryKeyCustody {
    pair: sr25519::Pair,
    phrase: String,
}

impl std::fmt::Debug for MemoryKeyCustody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryKeyCustody")
            .field("public", &self.pair.public())
            .finish_non_exhaustive()
    }
}

impl MemoryKeyCustody {
    /// Accepts a mnemonic, a `0x` seed or a derivation URI such as `//Alice`.
    pub fn from_phrase(phrase: &str) -> Result<Self, CustodyError> {
        let pair = sr25519::Pair::from_string(phrase, None)
            .map_err(|e| CustodyError::InvalidSecret(format!("{:?}", e)))?;
        Ok(Self {
            pair,
            phrase: phrase.to_string(),
        })
    }
}

#[async_trait]
impl KeyCustody for MemoryKeyCustody {
    async fn public_key(&self) -> Result<[u8; 32], CustodyError> {
        Ok(self.pair.public().0)
    }

    async fn export_seed(&self) -> Result<String, CustodyError> {
        Ok(self.phrase.clone())
    }

    async fn sign(&self, message: &[u8]) -> Result<[u8; 64], CustodyError> {
        Ok(self.pair.sign(message).0)
    }
}
