// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::types::HexHash;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockIdParseError {
    #[error("Invalid block hash '{0}'")]
    InvalidHash(String),

    #[error("Invalid block number '{0}'")]
    InvalidNumber(String),
}

/// Block identifier accepted by `getBlock`: a height, a hash or the latest
/// block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockId {
    Latest,
    Number(u32),
    Hash(HexHash),
}

impl FromStr for BlockId {
    type Err = BlockIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("latest") {
            return Ok(BlockId::Latest);
        }
        if s.starts_with("0x") {
            return s
                .parse::<HexHash>()
                .map(BlockId::Hash)
                .map_err(|_| BlockIdParseError::InvalidHash(s.to_string()));
        }
        s.parse::<u32>()
            .map(BlockId::Number)
            .map_err(|_| BlockIdParseError::InvalidNumber(s.to_string()))
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Latest => f.write_str("latest"),
            BlockId::Number(n) => write!(f, "{}", n),
            BlockId::Hash(hash) => write!(f, "{}", hash),
        }
    }
}
