// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod block;
pub mod hash;
pub mod hex;

pub use block::{BlockId, BlockIdParseError};
pub use hash::{HashError, compute_block_hash_from_header_json, parse_block_number_from_json};
pub use self::hex::{decode_hex, parse_hex_u128, to_hex};
