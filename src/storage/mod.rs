// src/storage/mod.rs

pub mod file;
pub mod keys;
pub mod memory;
pub mod traits;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::ConfigStore;
