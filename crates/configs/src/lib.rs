use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    #[serde(default)]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 0,
            worker_threads: Some(4),
            static_dir: default_static_dir(),
            log_format: String::new(),
        }
    }
}

/// The single administrator credential and how its session cookie behaves.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub username: String,
    /// Argon2 PHC string, e.g. produced by the `hash_password` binary.
    #[serde(default)]
    pub password_hash: String,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub secure_cookie: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password_hash: String::new(),
            session_ttl_secs: default_session_ttl(),
            cookie_name: default_cookie_name(),
            secure_cookie: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub data_file: String,
    #[serde(default)]
    pub blob: BlobConfig,
}

/// Remote blob service. Leaving `base_url` unset keeps the service on the local file.
#[derive(Debug, Clone, Deserialize)]
pub struct BlobConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_blob_namespace")]
    pub namespace: String,
    #[serde(default = "default_blob_key")]
    pub key: String,
    #[serde(default = "default_blob_timeout")]
    pub timeout_secs: u64,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            namespace: default_blob_namespace(),
            key: default_blob_key(),
            timeout_secs: default_blob_timeout(),
        }
    }
}

fn default_static_dir() -> String { "public".into() }
fn default_session_ttl() -> u64 { 60 * 60 * 24 }
fn default_cookie_name() -> String { "admin_token".into() }
fn default_blob_namespace() -> String { "services-store".into() }
fn default_blob_key() -> String { "services".into() }
fn default_blob_timeout() -> u64 { 10 }

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_FILE: &str = "data/services.json";

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to defaults when the
    /// file is absent, then fill gaps from the environment and validate.
    pub fn load_and_validate() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.normalize_from_env();
        self.validate()
    }

    pub fn normalize_from_env(&mut self) {
        self.server.normalize_from_env();
        self.admin.normalize_from_env();
        self.storage.normalize_from_env();
    }

    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.admin.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}

fn fill_from_env(slot: &mut String, var: &str) {
    if slot.trim().is_empty() {
        if let Ok(v) = std::env::var(var) {
            *slot = v;
        }
    }
}

impl ServerConfig {
    fn normalize_from_env(&mut self) {
        fill_from_env(&mut self.host, "SERVER_HOST");
        if self.host.trim().is_empty() {
            self.host = DEFAULT_HOST.to_string();
        }
        if self.port == 0 {
            self.port = std::env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT);
        }
        if self.worker_threads.is_none() {
            self.worker_threads = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse().ok());
        }
        fill_from_env(&mut self.log_format, "LOG_FORMAT");
    }

    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            return Err(anyhow!("server.worker_threads must be >= 1"));
        }
        Ok(())
    }
}

impl AdminConfig {
    fn normalize_from_env(&mut self) {
        fill_from_env(&mut self.username, "ADMIN_USERNAME");
        fill_from_env(&mut self.password_hash, "ADMIN_PASSWORD_HASH");
    }

    fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(anyhow!("admin.username is empty; set it in config.toml or ADMIN_USERNAME"));
        }
        if self.password_hash.trim().is_empty() {
            return Err(anyhow!("admin.password_hash is empty; set it in config.toml or ADMIN_PASSWORD_HASH"));
        }
        argon2::PasswordHash::new(&self.password_hash)
            .map_err(|e| anyhow!("admin.password_hash is not a valid PHC string: {e}"))?;
        if self.session_ttl_secs == 0 {
            return Err(anyhow!("admin.session_ttl_secs must be positive"));
        }
        if self.cookie_name.trim().is_empty() {
            return Err(anyhow!("admin.cookie_name is empty"));
        }
        Ok(())
    }
}

impl StorageConfig {
    fn normalize_from_env(&mut self) {
        fill_from_env(&mut self.data_file, "SERVICES_DATA_FILE");
        if self.data_file.trim().is_empty() {
            self.data_file = DEFAULT_DATA_FILE.to_string();
        }
        if self.blob.base_url.as_deref().map_or(true, |u| u.trim().is_empty()) {
            self.blob.base_url = std::env::var("BLOB_BASE_URL").ok().filter(|u| !u.trim().is_empty());
        }
        if self.blob.token.as_deref().map_or(true, |t| t.trim().is_empty()) {
            self.blob.token = std::env::var("BLOB_TOKEN").ok().filter(|t| !t.trim().is_empty());
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.blob.base_url {
            let lower = url.to_lowercase();
            if !(lower.starts_with("http://") || lower.starts_with("https://")) {
                return Err(anyhow!("storage.blob.base_url must start with http:// or https://"));
            }
        }
        if self.blob.timeout_secs == 0 {
            return Err(anyhow!("storage.blob.timeout_secs must be positive"));
        }
        if self.blob.namespace.trim().is_empty() || self.blob.key.trim().is_empty() {
            return Err(anyhow!("storage.blob.namespace and storage.blob.key must be set"));
        }
        Ok(())
    }
}
