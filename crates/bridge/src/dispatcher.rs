// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Single entry point of the RPC surface.
//!
//! Every request is validated before anything else happens. Chain
//! requests are then turned into a [`ChainJob`] offline, and only once
//! that succeeds is the shared connection looked up (or opened).

use crate::chain::{ChainConnector, TransactionIndexer};
use crate::custody::KeyCustody;
use crate::error::{BridgeError, DispatchError};
use crate::handlers::{self, ChainJob, account, configure, sign};
use crate::state::Session;
use crate::store::StateStore;
use crate::types::{LocalRequest, Operation, Request};
use crate::validation;
use config::{ConfigurationRequest, NetworkConfigs};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::Instrument;

pub struct Dispatcher {
    networks: NetworkConfigs,
    connector: Arc<dyn ChainConnector>,
    custody: Arc<dyn KeyCustody>,
    store: Arc<dyn StateStore>,
    indexer: Arc<dyn TransactionIndexer>,
    /// Only `configure` replaces the connection; everything else clones
    /// the handle out and releases the lock before any chain I/O.
    session: Mutex<Session>,
}

impl Dispatcher {
    pub fn new(
        networks: NetworkConfigs,
        connector: Arc<dyn ChainConnector>,
        custody: Arc<dyn KeyCustody>,
        store: Arc<dyn StateStore>,
        indexer: Arc<dyn TransactionIndexer>,
    ) -> Self {
        Self {
            networks,
            connector,
            custody,
            store,
            indexer,
            session: Mutex::new(Session::default()),
        }
    }

    /// Run one request. Errors carry the name of the method that failed.
    pub async fn handle(&self, method: &str, params: Option<&Value>) -> Result<Value, DispatchError> {
        let span = tracing::info_span!("request", method);
        async {
            let result = match Operation::from_method(method) {
                Some(operation) => self.dispatch(operation, params).await,
                None => Err(BridgeError::UnsupportedOperation(method.to_string())),
            };

            match result {
                Ok(value) => {
                    tracing::info!("Request completed");
                    Ok(value)
                }
                Err(e) => {
                    tracing::warn!(code = e.code(), error = %e, "Request failed");
                    Err(DispatchError::new(method, e))
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn dispatch(
        &self,
        operation: Operation,
        params: Option<&Value>,
    ) -> Result<Value, BridgeError> {
        match validation::validate(operation, params)? {
            Request::Chain(request) => {
                let job = ChainJob::prepare(request)?;
                let session = self
                    .session
                    .lock()
                    .await
                    .chain(
                        self.connector.as_ref(),
                        self.store.as_ref(),
                        &self.networks,
                    )
                    .await?;
                job.run(&session.context(), self.custody.as_ref()).await
            }
            Request::Local(request) => self.local(request).await,
        }
    }

    async fn local(&self, request: LocalRequest) -> Result<Value, BridgeError> {
        let custody = self.custody.as_ref();
        match request {
            LocalRequest::SignJson(params) => {
                handlers::to_value(&sign::sign_payload_json(custody, &params).await?)
            }
            LocalRequest::SignRaw(params) => {
                handlers::to_value(&sign::sign_payload_raw(custody, &params).await?)
            }
            LocalRequest::GetAddress => {
                let configuration = self.configuration().await?;
                Ok(Value::String(
                    account::get_address(custody, &configuration).await?,
                ))
            }
            LocalRequest::GetPublicKey => Ok(Value::String(account::get_public_key(custody).await?)),
            LocalRequest::ExportSeed => Ok(Value::String(account::export_seed(custody).await?)),
            LocalRequest::GetAllTransactions => {
                let configuration = self.configuration().await?;
                let records =
                    account::get_all_transactions(self.indexer.as_ref(), custody, &configuration)
                        .await?;
                handlers::to_value(&records)
            }
            LocalRequest::Configure(request) => self.configure(request).await,
        }
    }

    async fn configuration(&self) -> Result<config::Configuration, BridgeError> {
        self.session
            .lock()
            .await
            .configuration(self.store.as_ref(), &self.networks)
            .await
    }

    /// Commit a new configuration. Nothing changes unless the store
    /// accepted it; after that the old connection is closed and the next
    /// chain request connects to the new network.
    async fn configure(&self, request: ConfigurationRequest) -> Result<Value, BridgeError> {
        let configuration = configure::resolve(&self.networks, request)?;

        let mut session = self.session.lock().await;
        let initial = !session.is_configured(self.store.as_ref()).await?;
        self.store.save(&configuration).await?;
        let closed_connection = session.replace(configuration.clone()).await;

        tracing::info!(
            network = %configuration.network_name,
            ws_rpc_url = %configuration.ws_rpc_url,
            initial,
            closed_connection,
            "Applied configuration"
        );
        handlers::to_value(&configuration)
    }
}
