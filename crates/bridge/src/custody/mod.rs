// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Key custody collaborator. The bridge only asks it for public material
//! and signatures, and never reads the secret itself.

mod memory;

pub use memory::MemoryKeyCustody;

use async_trait::async_trait;
use sp_core::crypto::{AccountId32, Ss58AddressFormat, Ss58Codec};
use std::fmt;
use thiserror::Error;

#[derive(Error)]
pub enum CustodyError {
    #[error("Invalid secret: {0}")]
    InvalidSecret(String),
}

// Variants may carry fragments of secret material
impl fmt::Debug for CustodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustodyError::InvalidSecret(_) => write!(f, "CustodyError::InvalidSecret([REDACTED])"),
        }
    }
}

/// Holder of the account key.
#[async_trait]
pub trait KeyCustody: Send + Sync {
    /// Raw 32-byte public key of the account.
    async fn public_key(&self) -> Result<[u8; 32], CustodyError>;

    /// SS58 address of the account under the given network prefix.
    async fn address(&self, prefix: u16) -> Result<String, CustodyError> {
        let public = self.public_key().await?;
        Ok(AccountId32::from(public)
            .to_ss58check_with_version(Ss58AddressFormat::custom(prefix)))
    }

    async fn export_seed(&self) -> Result<String, CustodyError>;

    /// 64-byte sr25519 signature over `message`.
    async fn sign(&self, message: &[u8]) -> Result<[u8; 64], CustodyError>;
}
