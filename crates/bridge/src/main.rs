// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Context;
use config::{Args, BridgeConfig, NetworkConfigs};
use serde::Deserialize;
use serde_json::{Value, json};
use snap_bridge::chain::{HttpIndexer, RpcConnector};
use snap_bridge::custody::MemoryKeyCustody;
use snap_bridge::logging::{self, LoggingConfig};
use snap_bridge::store::FileStateStore;
use snap_bridge::{DispatchError, Dispatcher};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Debug, Deserialize)]
struct RpcRequest {
    #[serde(default)]
    id: Value,
    method: String,
    #[serde(default)]
    params: Option<Value>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    let config = BridgeConfig::from_env_file(&args.env_file)?;
    let _log_guard = logging::init_with_config(LoggingConfig::from(&config.log))?;

    let seed_phrase = config
        .custody
        .seed_phrase
        .as_deref()
        .context("SNAP_SEED_PHRASE must be set")?;
    let custody = MemoryKeyCustody::from_phrase(seed_phrase)?;
    let networks = NetworkConfigs::load()?;

    let dispatcher = Dispatcher::new(
        networks,
        Arc::new(RpcConnector),
        Arc::new(custody),
        Arc::new(FileStateStore::new(&config.state.path)),
        Arc::new(HttpIndexer::new()),
    );

    tracing::info!(state_path = %config.state.path, "Bridge ready, reading requests from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<RpcRequest>(&line) {
            Ok(request) => {
                let result = dispatcher
                    .handle(&request.method, request.params.as_ref())
                    .await;
                response(request.id, result)
            }
            Err(e) => json!({
                "id": Value::Null,
                "error": { "code": "SchemaError", "message": e.to_string(), "operation": Value::Null },
            }),
        };

        let mut out = serde_json::to_vec(&response)?;
        out.push(b'\n');
        stdout.write_all(&out).await?;
        stdout.flush().await?;
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}

fn response(id: Value, result: Result<Value, DispatchError>) -> Value {
    match result {
        Ok(result) => json!({ "id": id, "result": result }),
        Err(e) => json!({
            "id": id,
            "error": {
                "code": e.code(),
                "message": e.source.to_string(),
                "operation": e.operation,
            },
        }),
    }
}
