// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Transfer history served by a GraphQL indexer. Nodes do not keep an
//! account-indexed history, so this never goes through the chain client.

use super::ChainError;
use async_trait::async_trait;
use futures::stream::{self, Stream, TryStreamExt};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Transfers requested per indexer round trip.
pub const PAGE_SIZE: usize = 100;

const TRANSFERS_QUERY: &str = "query Transfers($address: String!, $limit: Int!, $offset: Int!) { \
    transfers(where: {OR: [{from_eq: $address}, {to_eq: $address}]}, \
    orderBy: blockNumber_DESC, limit: $limit, offset: $offset) \
    { extrinsicHash from amount } }";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub hash: String,
    pub sender: String,
    pub amount: String,
}

#[async_trait]
pub trait TransactionIndexer: Send + Sync {
    /// One page of transfers involving `address`, newest first.
    async fn page(
        &self,
        url: &str,
        address: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, ChainError>;
}

/// Lazy sequence over every transfer of `address`.
///
/// Pages are fetched on demand and the sequence ends after the first short
/// page. It cannot be restarted.
pub fn transactions<'a>(
    indexer: &'a dyn TransactionIndexer,
    url: &'a str,
    address: &'a str,
) -> impl Stream<Item = Result<TransactionRecord, ChainError>> + Send + 'a {
    stream::try_unfold(Some(0usize), move |offset| async move {
        let Some(offset) = offset else {
            return Ok(None);
        };
        let page = indexer.page(url, address, offset, PAGE_SIZE).await?;
        if page.is_empty() {
            return Ok(None);
        }
        let next = (page.len() == PAGE_SIZE).then_some(offset + page.len());
        Ok(Some((stream::iter(page.into_iter().map(Ok::<_, ChainError>)), next)))
    })
    .try_flatten()
}

pub async fn collect(
    indexer: &dyn TransactionIndexer,
    url: &str,
    address: &str,
) -> Result<Vec<TransactionRecord>, ChainError> {
    transactions(indexer, url, address).try_collect().await
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<TransfersData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct TransfersData {
    transfers: Vec<Transfer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Transfer {
    extrinsic_hash: Option<String>,
    from: String,
    amount: String,
}

/// [`TransactionIndexer`] speaking GraphQL over HTTP.
#[derive(Debug, Clone, Default)]
pub struct HttpIndexer {
    client: reqwest::Client,
}

impl HttpIndexer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionIndexer for HttpIndexer {
    async fn page(
        &self,
        url: &str,
        address: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, ChainError> {
        let body = json!({
            "query": TRANSFERS_QUERY,
            "variables": { "address": address, "limit": limit, "offset": offset },
        });

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChainError::Indexer(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChainError::Indexer(format!(
                "HTTP {}",
                response.status().as_u16()
            )));
        }

        let response: GraphqlResponse = response
            .json()
            .await
            .map_err(|e| ChainError::Indexer(e.to_string()))?;

        if let Some(error) = response.errors.first() {
            return Err(ChainError::Indexer(error.message.clone()));
        }
        let data = response
            .data
            .ok_or_else(|| ChainError::Indexer("response carries no data".to_string()))?;

        Ok(data
            .transfers
            .into_iter()
            .map(|t| TransactionRecord {
                hash: t.extrinsic_hash.unwrap_or_default(),
                sender: t.from,
                amount: t.amount,
            })
            .collect())
    }
}
