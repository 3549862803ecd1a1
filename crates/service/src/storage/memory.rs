use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CollectionBackend;
use crate::catalog::Service;
use crate::errors::StorageError;

/// In-process backend for tests; built only with `cfg(test)` or the
/// `test-support` feature.
///
/// `set_available(false)` makes every call fail with `Unavailable`, which is
/// how tests simulate an outage of one link in the fallback chain.
pub struct MemoryBackend {
    name: &'static str,
    inner: RwLock<Option<Vec<Service>>>,
    available: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryBackend {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: RwLock::new(None),
            available: AtomicBool::new(true),
            writes: AtomicUsize::new(0),
        }
    }

    /// Start out holding `services`, as if they had been written earlier.
    pub fn with_services(name: &'static str, services: Vec<Service>) -> Self {
        Self { inner: RwLock::new(Some(services)), ..Self::new(name) }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of successful `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Current contents, bypassing the availability switch.
    pub async fn snapshot(&self) -> Option<Vec<Service>> {
        self.inner.read().await.clone()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StorageError::unavailable(self.name, "simulated outage"))
        }
    }
}

#[async_trait]
impl CollectionBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn get(&self) -> Result<Option<Vec<Service>>, StorageError> {
        self.check()?;
        Ok(self.inner.read().await.clone())
    }

    async fn set(&self, services: &[Service]) -> Result<(), StorageError> {
        self.check()?;
        *self.inner.write().await = Some(services.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
