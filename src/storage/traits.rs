// src/storage/traits.rs

use crate::error::Result;
use async_trait::async_trait;

/// Trait for the persistent key-value store backing the synchronizer.
///
/// Writes are atomic per key but not transactional across keys; a process
/// that dies mid-resolution may persist only some fields. Each field
/// independently falls back to its own cached/default value on the next
/// read, so partial writes are tolerated.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Get a stored string value, `None` if the key was never set.
    async fn get_string(&self, key: &str) -> Result<Option<String>>;

    /// Store a string value under `key`.
    async fn set_string(&self, key: &str, value: &str) -> Result<()>;

    /// Get a stored boolean value, `None` if the key was never set.
    async fn get_bool(&self, key: &str) -> Result<Option<bool>>;

    /// Store a boolean value under `key`.
    async fn set_bool(&self, key: &str, value: bool) -> Result<()>;

    /// Remove a stored value. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
