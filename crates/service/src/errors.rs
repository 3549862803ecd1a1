use thiserror::Error;

/// Failures raised by a single storage backend or by the whole fallback chain.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{backend} unavailable: {reason}")]
    Unavailable { backend: &'static str, reason: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("http error: {0}")]
    Http(String),
    #[error("all storage backends failed during {op}: {}", .attempts.join("; "))]
    Exhausted { op: &'static str, attempts: Vec<String> },
}

impl StorageError {
    pub fn unavailable(backend: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable { backend, reason: reason.into() }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }
}
