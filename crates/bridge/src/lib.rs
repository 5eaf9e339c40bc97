// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod chain;
pub mod custody;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod payload;
pub mod state;
pub mod store;
pub mod types;
pub mod utils;
pub mod validation;

#[cfg(test)]
pub mod test_fixtures;

pub use dispatcher::Dispatcher;
pub use error::{BridgeError, DispatchError};
