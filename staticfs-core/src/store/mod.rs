//! The store capability the file server reads from.
//!
//! A [`Store`] maps lookup keys (always `/`-rooted strings) to open handles.
//! The server never touches a concrete file system, so a store can be a local
//! directory, an in-memory bundle, or assets compiled into the binary.

#[cfg(feature = "dir_store")]
mod dir;
#[cfg(feature = "embedded_store")]
mod embedded;
mod error;
mod memory;
#[cfg(test)]
mod tests;

use async_trait::async_trait;
use bytes::Bytes;
use std::time::SystemTime;

#[cfg(feature = "dir_store")]
pub use dir::DirStore;
#[cfg(feature = "embedded_store")]
pub use embedded::EmbeddedStore;
pub use error::StoreError;
pub use memory::MemoryStore;

/// File or directory attributes, reported verbatim by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub name: String,
    pub size: u64,
    pub modified: Option<SystemTime>,
    pub is_dir: bool,
}

impl Metadata {
    pub fn file(name: impl Into<String>, size: u64, modified: Option<SystemTime>) -> Self {
        Self {
            name: name.into(),
            size,
            modified,
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>, modified: Option<SystemTime>) -> Self {
        Self {
            name: name.into(),
            size: 0,
            modified,
            is_dir: true,
        }
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Opens `key`.
    ///
    /// Implementations must report a missing key as [`StoreError::NotFound`] so
    /// the server can tell a 404 apart from a failing backend.
    async fn open(&self, key: &str) -> Result<Box<dyn StoreFile>, StoreError>;
}

/// An open handle, owned by exactly one request.
#[async_trait]
pub trait StoreFile: Send + Sync {
    async fn metadata(&self) -> Result<Metadata, StoreError>;

    /// Lists the direct children of a directory handle, in store order.
    async fn read_dir(&mut self) -> Result<Vec<Metadata>, StoreError>;

    /// Reads up to `max` bytes. `None` marks end of file.
    async fn read_chunk(&mut self, max: usize) -> Result<Option<Bytes>, StoreError>;

    /// Releases the handle. Dropping a handle also releases it, but only
    /// `close` reports failures.
    async fn close(&mut self) -> Result<(), StoreError>;
}

/// Returns the last path segment of a `/`-rooted key, or `/` for the root.
pub(crate) fn base_name(key: &str) -> &str {
    let trimmed = key.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((_, name)) if !name.is_empty() => name,
        _ if trimmed.is_empty() => "/",
        _ => trimmed,
    }
}
