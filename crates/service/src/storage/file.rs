use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::CollectionBackend;
use crate::catalog::Service;
use crate::errors::StorageError;

/// JSON file-backed collection.
///
/// Stores the full service list as one pretty-printed JSON array at a fixed
/// path. A missing file reads as "never written".
#[derive(Clone, Debug)]
pub struct FileBackend {
    file_path: PathBuf,
}

impl FileBackend {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.file_path
    }
}

#[async_trait]
impl CollectionBackend for FileBackend {
    fn name(&self) -> &'static str {
        "local-file"
    }

    async fn get(&self) -> Result<Option<Vec<Service>>, StorageError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "data file missing, treating as empty");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let services: Vec<Service> = serde_json::from_slice(&bytes)?;
        Ok(Some(services))
    }

    async fn set(&self, services: &[Service]) -> Result<(), StorageError> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let data = serde_json::to_vec_pretty(services)?;
        fs::write(&self.file_path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("file_backend_{}", uuid::Uuid::new_v4()))
            .join("services.json")
    }

    fn svc(id: &str, name: &str) -> Service {
        Service { id: id.into(), name: name.into(), description: None, price: "Consultar".into() }
    }

    #[tokio::test]
    async fn missing_file_reads_as_none() -> Result<(), anyhow::Error> {
        let backend = FileBackend::new(temp_path());
        assert!(backend.get().await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn round_trip_preserves_content_and_order() -> Result<(), anyhow::Error> {
        let path = temp_path();
        let backend = FileBackend::new(&path);

        for services in [
            vec![],
            vec![svc("1", "Balanceo")],
            vec![svc("3", "Parches"), svc("1", "Balanceo"), svc("2", "Alineación")],
        ] {
            backend.set(&services).await?;
            assert_eq!(backend.get().await?, Some(services));
        }

        // pretty-printed array on disk
        let raw = tokio::fs::read_to_string(&path).await?;
        assert!(raw.starts_with('['));
        assert!(raw.contains("\n  {"));

        if let Some(dir) = path.parent() {
            let _ = tokio::fs::remove_dir_all(dir).await;
        }
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() -> Result<(), anyhow::Error> {
        let path = temp_path();
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(&path, b"{not json").await?;
        let backend = FileBackend::new(&path);
        assert!(matches!(backend.get().await, Err(StorageError::Serde(_))));
        if let Some(dir) = path.parent() {
            let _ = tokio::fs::remove_dir_all(dir).await;
        }
        Ok(())
    }
}
