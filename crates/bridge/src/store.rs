// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistence of the active network configuration across sessions.

use async_trait::async_trait;
use config::Configuration;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access state file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("State file {path} is corrupt")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[async_trait]
pub trait StateStore: Send + Sync {
    /// The last committed configuration, if any.
    async fn load(&self) -> Result<Option<Configuration>, StoreError>;

    /// Commit `configuration`. Either it is fully stored or the previous
    /// value is left in place.
    async fn save(&self, configuration: &Configuration) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryStateStore {
    configuration: Mutex<Option<Configuration>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_configuration(configuration: Configuration) -> Self {
        Self {
            configuration: Mutex::new(Some(configuration)),
        }
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn load(&self) -> Result<Option<Configuration>, StoreError> {
        Ok(self.configuration.lock().await.clone())
    }

    async fn save(&self, configuration: &Configuration) -> Result<(), StoreError> {
        *self.configuration.lock().await = Some(configuration.clone());
        Ok(())
    }
}

/// JSON file store. Writes go to a sibling temp file which is then renamed
/// over the target.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn load(&self) -> Result<Option<Configuration>, StoreError> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_slice(&contents)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    async fn save(&self, configuration: &Configuration) -> Result<(), StoreError> {
        let contents = serde_json::to_vec_pretty(configuration)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, &contents)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), "Persisted configuration");
        Ok(())
    }
}
