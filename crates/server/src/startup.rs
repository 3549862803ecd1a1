use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::{
    auth::{AdminCredentials, SessionGate, SessionPolicy},
    catalog::ServiceStore,
    storage::{blob::BlobOptions, BlobBackend, CollectionBackend, FallbackChain, FileBackend},
};

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Remote blob first, local file second.
pub fn build_chain(cfg: &AppConfig) -> anyhow::Result<FallbackChain> {
    let blob = &cfg.storage.blob;
    let remote: Arc<dyn CollectionBackend> = Arc::new(BlobBackend::new(BlobOptions {
        base_url: blob.base_url.clone(),
        token: blob.token.clone(),
        namespace: blob.namespace.clone(),
        key: blob.key.clone(),
        timeout: Duration::from_secs(blob.timeout_secs),
    })?);
    let local: Arc<dyn CollectionBackend> = Arc::new(FileBackend::new(&cfg.storage.data_file));
    Ok(FallbackChain::new(vec![remote, local]))
}

pub fn build_gate(cfg: &AppConfig) -> anyhow::Result<SessionGate> {
    let admin = &cfg.admin;
    let gate = SessionGate::new(
        AdminCredentials { username: admin.username.clone(), password_hash: admin.password_hash.clone() },
        SessionPolicy {
            cookie_name: admin.cookie_name.clone(),
            ttl: Duration::from_secs(admin.session_ttl_secs),
            secure: admin.secure_cookie,
        },
    )?;
    Ok(gate)
}

pub fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let chain = build_chain(cfg)?;
    info!(backends = ?chain.backend_names(), data_file = %cfg.storage.data_file, "storage chain ready");
    Ok(ServerState::new(ServiceStore::new(chain), build_gate(cfg)?))
}

/// Router for a validated config; used by `run` and by the integration tests.
pub fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let state = build_state(cfg)?;
    Ok(routes::build_router(state, build_cors(), &cfg.server.static_dir))
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
    }
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::ensure_env(&cfg.server.static_dir, &cfg.storage.data_file).await?;

    let app = build_app(&cfg)?;
    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
