//! Storage abstractions for the service catalog
//!
//! Every backend persists the whole collection at once; there is no
//! per-record write path. Backends are tried in order by [`FallbackChain`].

use async_trait::async_trait;

use crate::catalog::Service;
use crate::errors::StorageError;

pub mod blob;
pub mod chain;
pub mod file;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;

pub use blob::BlobBackend;
pub use chain::FallbackChain;
pub use file::FileBackend;
#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryBackend;

/// Capability shared by every persistence backend: read or replace the full collection.
#[async_trait]
pub trait CollectionBackend: Send + Sync {
    /// Short label used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Read the stored collection; `Ok(None)` means nothing was ever written.
    async fn get(&self) -> Result<Option<Vec<Service>>, StorageError>;

    /// Replace the stored collection.
    async fn set(&self, services: &[Service]) -> Result<(), StorageError>;
}
