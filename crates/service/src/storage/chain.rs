use std::sync::Arc;

use tracing::{debug, error, warn};

use super::CollectionBackend;
use crate::catalog::Service;
use crate::errors::StorageError;

/// Ordered list of backends tried in sequence until one succeeds.
///
/// A call only fails when every backend failed; earlier failures are logged
/// and swallowed, so a misconfigured remote store silently degrades to the
/// next link (the local file in a default deployment).
#[derive(Clone)]
pub struct FallbackChain {
    backends: Vec<Arc<dyn CollectionBackend>>,
}

impl FallbackChain {
    pub fn new(backends: Vec<Arc<dyn CollectionBackend>>) -> Self {
        Self { backends }
    }

    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    pub async fn get(&self) -> Result<Option<Vec<Service>>, StorageError> {
        let mut attempts = Vec::new();
        for backend in &self.backends {
            match backend.get().await {
                Ok(found) => {
                    debug!(op = "get", backend = backend.name(), "storage read served");
                    return Ok(found);
                }
                Err(e) => {
                    warn!(op = "get", backend = backend.name(), error = %e, "storage backend failed, trying next");
                    attempts.push(format!("{}: {}", backend.name(), e));
                }
            }
        }
        Err(exhausted("get", attempts))
    }

    pub async fn set(&self, services: &[Service]) -> Result<(), StorageError> {
        let mut attempts = Vec::new();
        for backend in &self.backends {
            match backend.set(services).await {
                Ok(()) => {
                    debug!(op = "set", backend = backend.name(), count = services.len(), "storage write persisted");
                    return Ok(());
                }
                Err(e) => {
                    warn!(op = "set", backend = backend.name(), error = %e, "storage backend failed, trying next");
                    attempts.push(format!("{}: {}", backend.name(), e));
                }
            }
        }
        Err(exhausted("set", attempts))
    }
}

fn exhausted(op: &'static str, attempts: Vec<String>) -> StorageError {
    error!(op, attempts = ?attempts, "all storage backends failed");
    StorageError::Exhausted { op, attempts }
}
