//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::warn;

/// Ensure the data directory exists; warn when the static asset directory is missing.
pub async fn ensure_env(static_dir: &str, data_file: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(static_dir).await.is_err() {
        warn!(%static_dir, "static assets directory not found; homepage may 404");
    }
    if let Some(parent) = Path::new(data_file).parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    Ok(())
}
