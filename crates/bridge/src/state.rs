// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Session state owned by the dispatcher: the active configuration and
//! the single chain connection opened for it.

use crate::chain::{ChainClient, ChainConnector};
use crate::error::BridgeError;
use crate::store::StateStore;
use config::{Configuration, NetworkConfigs};
use std::sync::Arc;

/// What chain-dependent code may see of the session for one request.
#[derive(Clone, Copy)]
pub struct ChainContext<'a> {
    pub client: &'a dyn ChainClient,
    pub configuration: &'a Configuration,
}

/// A connection handle and the configuration it was opened for, detached
/// from the session lock for the duration of one request.
#[derive(Clone)]
pub struct ChainSession {
    client: Arc<dyn ChainClient>,
    configuration: Configuration,
}

impl ChainSession {
    pub fn context(&self) -> ChainContext<'_> {
        ChainContext {
            client: self.client.as_ref(),
            configuration: &self.configuration,
        }
    }
}

#[derive(Default)]
pub(crate) struct Session {
    /// Cached active configuration, possibly the default network's.
    configuration: Option<Configuration>,
    /// Set once `configure` has committed in this process.
    committed: bool,
    connection: Option<Arc<dyn ChainClient>>,
}

impl Session {
    /// The active configuration: the in-memory one, else the persisted
    /// one, else the default network.
    pub(crate) async fn configuration(
        &mut self,
        store: &dyn StateStore,
        networks: &NetworkConfigs,
    ) -> Result<Configuration, BridgeError> {
        if let Some(configuration) = &self.configuration {
            return Ok(configuration.clone());
        }

        let configuration = match store.load().await? {
            Some(persisted) => persisted,
            None => networks.default_configuration(),
        };
        self.configuration = Some(configuration.clone());
        Ok(configuration)
    }

    /// Whether a configuration has ever been committed. A cached default
    /// does not count.
    pub(crate) async fn is_configured(
        &self,
        store: &dyn StateStore,
    ) -> Result<bool, BridgeError> {
        Ok(self.committed || store.load().await?.is_some())
    }

    /// The open connection, established on first use.
    pub(crate) async fn chain(
        &mut self,
        connector: &dyn ChainConnector,
        store: &dyn StateStore,
        networks: &NetworkConfigs,
    ) -> Result<ChainSession, BridgeError> {
        let configuration = self.configuration(store, networks).await?;
        let client = match &self.connection {
            Some(client) => client.clone(),
            None => {
                let client = connector.connect(&configuration).await?;
                self.connection = Some(client.clone());
                client
            }
        };
        Ok(ChainSession {
            client,
            configuration,
        })
    }

    /// Install a committed configuration, closing the connection opened
    /// for the previous one. Returns whether a connection was closed.
    pub(crate) async fn replace(&mut self, configuration: Configuration) -> bool {
        self.configuration = Some(configuration);
        self.committed = true;
        match self.connection.take() {
            Some(client) => {
                client.disconnect().await;
                true
            }
            None => false,
        }
    }
}
