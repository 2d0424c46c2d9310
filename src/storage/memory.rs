// src/storage/memory.rs

use crate::error::Result;
use crate::storage::traits::ConfigStore;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory implementation of the persistent store, used in tests and as
/// a fallback when no durable backend is wired up.
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
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
        Ok(())
    }

    async fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        let values = self.values.read().await;
        Ok(values.get(key).and_then(Value::as_bool))
    }

    async fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        let mut values = self.values.write().await;
        values.insert(key.to_owned(), Value::Bool(value));
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().await;
        values.remove(key);
        Ok(())
    }
}
