use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::CollectionBackend;
use crate::catalog::Service;
use crate::errors::StorageError;

/// Default timeout for blob service requests (10 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const NAME: &str = "remote-blob";

/// Connection settings for the remote key-value blob service.
#[derive(Clone, Debug)]
pub struct BlobOptions {
    /// Base URL of the blob service; `None` when the service is not provisioned.
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub namespace: String,
    pub key: String,
    pub timeout: Duration,
}

impl Default for BlobOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            namespace: "services-store".into(),
            key: "services".into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Remote blob backend.
///
/// Stores the collection as a JSON array under `{base_url}/{namespace}/{key}`:
/// `GET` reads it (404 means never written), `PUT` replaces it.
pub struct BlobBackend {
    client: Client,
    url: Option<String>,
    token: Option<String>,
}

impl BlobBackend {
    pub fn new(options: BlobOptions) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| StorageError::Http(e.to_string()))?;
        let url = options
            .base_url
            .filter(|u| !u.trim().is_empty())
            .map(|base| format!("{}/{}/{}", base.trim_end_matches('/'), options.namespace, options.key));
        Ok(Self { client, url, token: options.token })
    }

    fn endpoint(&self) -> Result<&str, StorageError> {
        self.url
            .as_deref()
            .ok_or_else(|| StorageError::unavailable(NAME, "blob service not configured"))
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

#[async_trait]
impl CollectionBackend for BlobBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn get(&self) -> Result<Option<Vec<Service>>, StorageError> {
        let url = self.endpoint()?;
        let resp = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(|e| StorageError::unavailable(NAME, e.to_string()))?;

        match resp.status() {
            StatusCode::NOT_FOUND => {
                debug!(%url, "blob key not found, treating as empty");
                Ok(None)
            }
            status if status.is_success() => {
                let bytes = resp.bytes().await.map_err(|e| StorageError::Http(e.to_string()))?;
                if bytes.is_empty() {
                    return Ok(None);
                }
                let services: Option<Vec<Service>> = serde_json::from_slice(&bytes)?;
                Ok(services)
            }
            status => Err(StorageError::Http(format!("GET {url} returned {status}"))),
        }
    }

    async fn set(&self, services: &[Service]) -> Result<(), StorageError> {
        let url = self.endpoint()?;
        let resp = self
            .authorize(self.client.put(url))
            .json(services)
            .send()
            .await
            .map_err(|e| StorageError::unavailable(NAME, e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(StorageError::Http(format!("PUT {url} returned {status}")));
        }
        Ok(())
    }
}
