use std::path::Path;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::openapi;
use crate::state::ServerState;

pub mod auth;
pub mod services;

/// Plain acknowledgement body.
#[derive(Serialize, Debug)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: JSON API, admin-gated mutations and
/// the static homepage as fallback.
pub fn build_router(state: ServerState, cors: CorsLayer, static_dir: &str) -> Router {
    let index = Path::new(static_dir).join("index.html");
    let static_files = ServeDir::new(static_dir).fallback(ServeFile::new(index));

    // Mutations need a session; listing stays public.
    let guarded = post(services::create)
        .put(services::update)
        .delete(services::remove)
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin_session));

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi::spec))
        .route("/services", get(services::list).merge(guarded))
        .route("/auth", get(auth::status).post(auth::login).delete(auth::logout))
        .fallback_service(static_files)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
