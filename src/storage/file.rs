// src/storage/file.rs

use crate::error::{ConfigError, Result};
use crate::storage::traits::ConfigStore;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Durable store backed by a single flat JSON object on disk.
///
/// The whole object is rewritten on every set, which keeps individual key
/// updates atomic at the granularity the synchronizer needs. An unreadable
/// or corrupt file is treated as an empty store rather than an error, so a
/// damaged cache degrades to compiled defaults instead of wedging startup.
pub struct FileStore {
    path: PathBuf,
    values: RwLock<Map<String, Value>>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Value>(&bytes) {
                Ok(Value::Object(map)) => map,
                Ok(_) | Err(_) => {
                    warn!(path = %path.display(), "Store file is not a JSON object, starting empty");
                    Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Store file not found, starting empty");
                Map::new()
            }
            Err(e) => {
                return Err(ConfigError::storage(
                    "open",
                    format!("failed to read '{}': {e}", path.display()),
                ))
            }
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full object to a sibling temp file and rename it over the
    /// store, so a crash mid-write can never leave a half-written file.
    async fn persist(&self, values: &Map<String, Value>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&Value::Object(values.clone()))
            .map_err(|e| ConfigError::storage("serialize", e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes).await.map_err(|e| {
            ConfigError::storage(
                "write",
                format!("failed to write '{}': {e}", tmp.display()),
            )
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            ConfigError::storage(
                "rename",
                format!("failed to rename '{}': {e}", self.path.display()),
            )
        })
    }
}

#[async_trait]
impl ConfigStore for FileStore {
    async fn get_string(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.read().await;
        Ok(values
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_owned))
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().await;
        values.insert(key.to_owned(), Value::String(value.to_owned()));
        self.persist(&values).await
    }

    async fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        let values = self.values.read().await;
        Ok(values.get(key).and_then(Value::as_bool))
    }

    async fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        let mut values = self.values.write().await;
        values.insert(key.to_owned(), Value::Bool(value));
        self.persist(&values).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().await;
        if values.remove(key).is_some() {
            self.persist(&values).await?;
        }
        Ok(())
    }
}
