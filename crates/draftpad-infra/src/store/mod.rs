//! Key-value store implementations - in-memory and file-backed.

mod memory;

#[cfg(feature = "file-store")]
mod file;

pub use memory::{InMemoryStore, InMemoryStoreConfig};

#[cfg(feature = "file-store")]
pub use file::FileStore;
