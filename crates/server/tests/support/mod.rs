#![allow(dead_code)]

use std::path::PathBuf;

use argon2::Params;
use configs::AppConfig;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "s3cret-pass";

/// Fresh data file under target/ so parallel tests never share state.
pub fn temp_data_file() -> PathBuf {
    PathBuf::from(format!("target/test-data/{}/services.json", uuid::Uuid::new_v4()))
}

/// Config with no blob service, so every call falls through to `data_file`.
pub fn test_config(data_file: &std::path::Path) -> anyhow::Result<AppConfig> {
    let mut cfg = AppConfig::default();
    cfg.admin.username = ADMIN_USER.into();
    // low cost keeps login fast in debug builds
    let params = Params::new(1024, 1, 1, None).map_err(|e| anyhow::anyhow!("argon2 params: {e}"))?;
    cfg.admin.password_hash = service::auth::hash_password_with(ADMIN_PASS, params)?;
    cfg.storage.data_file = data_file.to_string_lossy().into_owned();
    cfg.server.host = "127.0.0.1".into();
    cfg.server.port = 8080;
    cfg.server.static_dir = "target/test-data/no-static".into();
    cfg.validate()?;
    Ok(cfg)
}

pub async fn cleanup(data_file: &std::path::Path) {
    if let Some(dir) = data_file.parent() {
        let _ = tokio::fs::remove_dir_all(dir).await;
    }
}
