// src/lib.rs

//! Client-side remote-configuration synchronizer.
//!
//! Fetches a JSON configuration document from a fixed (but overridable)
//! endpoint, resolves each field through a three-tier fallback chain
//! (valid incoming value, previously cached value, compiled default),
//! persists the resolved values and emits typed change events. Failed
//! fetches are silently ignored: the previously resolved configuration
//! stays authoritative, because staleness beats erroring out a client.

pub mod cli;
pub mod document;
pub mod endpoint;
pub mod error;
pub mod events;
pub mod fetcher;
pub mod resolver;
pub mod storage;
pub mod sync;

// Re-export the key types for convenience.
pub use document::ConfigDocument;
pub use error::{ConfigError, Result};
pub use events::{ConfigEvent, RestartNotice};
pub use resolver::{Defaults, ResolvedConfig};
pub use storage::{ConfigStore, FileStore, MemoryStore};
pub use sync::{FetchSnapshot, RemoteConfig};
