// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Deserializer, Serialize};
use sp_core::H256;
use std::fmt;
use std::str::FromStr;

/// 32-byte hash (block, genesis or extrinsic) with a controlled string form.
///
/// Renders as "0x" followed by 64 lowercase hex characters, both through
/// `Display` and in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HexHash(pub H256);

impl HexHash {
    pub fn new(hash: H256) -> Self {
        Self(hash)
    }

    pub fn inner(&self) -> &H256 {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_fixed_bytes()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<H256> for HexHash {
    fn from(hash: H256) -> Self {
        Self(hash)
    }
}

impl From<[u8; 32]> for HexHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(H256::from(bytes))
    }
}

impl From<HexHash> for H256 {
    fn from(hash: HexHash) -> Self {
        hash.0
    }
}

impl fmt::Display for HexHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // H256's Debug impl formats the full "0x..." form
        write!(f, "{:?}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexHashParseError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

impl FromStr for HexHash {
    type Err = HexHashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_str = s.strip_prefix("0x").unwrap_or(s);
        let bytes =
            hex::decode(hex_str).map_err(|e| HexHashParseError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(HexHashParseError::InvalidLength(bytes.len()));
        }
        Ok(Self(H256::from_slice(&bytes)))
    }
}

impl Serialize for HexHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HexHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
