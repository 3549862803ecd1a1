use tokio::sync::Mutex;
use tracing::{info, instrument};

use super::domain::{next_id, Service, ServiceInput};
use crate::errors::ServiceError;
use crate::storage::FallbackChain;

/// CRUD over the whole service collection.
///
/// Every operation reads and rewrites the full collection through the
/// fallback chain. Mutations inside one process are serialised; separate
/// processes sharing a backend can still overwrite each other's writes.
pub struct ServiceStore {
    chain: FallbackChain,
    write_lock: Mutex<()>,
}

impl ServiceStore {
    pub fn new(chain: FallbackChain) -> Self {
        Self { chain, write_lock: Mutex::new(()) }
    }

    /// All services in stored order; empty when nothing was ever written.
    pub async fn list(&self) -> Result<Vec<Service>, ServiceError> {
        Ok(self.chain.get().await?.unwrap_or_default())
    }

    /// Append a new service with a freshly assigned id.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::catalog::{ServiceInput, ServiceStore};
    /// use service::storage::{CollectionBackend, FallbackChain, FileBackend};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let path = std::env::temp_dir().join(format!("services-doc-{}.json", std::process::id()));
    /// # let _ = std::fs::remove_file(&path);
    /// let backend: Arc<dyn CollectionBackend> = Arc::new(FileBackend::new(&path));
    /// let store = ServiceStore::new(FallbackChain::new(vec![backend]));
    /// let rt = tokio::runtime::Builder::new_current_thread().build()?;
    /// let created = rt.block_on(store.create(ServiceInput { name: "Balanceo".into(), description: None, price: "Consultar".into() }))?;
    /// assert!(!created.id.is_empty());
    /// assert_eq!(rt.block_on(store.list())?, vec![created]);
    /// # std::fs::remove_file(&path)?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: ServiceInput) -> Result<Service, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut services = self.list().await?;
        let service = input.into_service(next_id(&services));
        services.push(service.clone());
        self.chain.set(&services).await?;
        info!(id = %service.id, "service_created");
        Ok(service)
    }

    /// Replace the record with the same id, keeping its position.
    #[instrument(skip(self, record), fields(id = %record.id))]
    pub async fn update(&self, record: Service) -> Result<Service, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut services = self.list().await?;
        let slot = services
            .iter_mut()
            .find(|s| s.id == record.id)
            .ok_or_else(|| ServiceError::not_found("service"))?;
        *slot = record.clone();
        self.chain.set(&services).await?;
        info!("service_updated");
        Ok(record)
    }

    /// Remove the record with `id`. Unknown ids succeed without touching storage;
    /// the return value tells whether anything was removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut services = self.list().await?;
        let Some(pos) = services.iter().position(|s| s.id == id) else {
            return Ok(false);
        };
        services.remove(pos);
        self.chain.set(&services).await?;
        info!("service_deleted");
        Ok(true)
    }
}
