use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use service::catalog::{Service, ServiceInput};

use super::Ack;
use crate::errors::ApiError;
use crate::extract::ApiJson;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
}

/// Public listing, in stored order.
#[utoipa::path(get, path = "/services", tag = "services", responses((status = 200, description = "All services", body = [crate::openapi::ServiceDoc])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Service>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

#[utoipa::path(post, path = "/services", tag = "services", request_body = crate::openapi::ServiceInputDoc, responses((status = 200, description = "Created", body = crate::openapi::ServiceDoc), (status = 400, description = "Missing name or price"), (status = 401, description = "Unauthorized"), (status = 500, description = "Storage unavailable")))]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<ServiceInput>,
) -> Result<Json<Service>, ApiError> {
    input.validate()?;
    Ok(Json(state.store.create(input).await?))
}

#[utoipa::path(put, path = "/services", tag = "services", request_body = crate::openapi::ServiceDoc, responses((status = 200, description = "Updated", body = crate::openapi::ServiceDoc), (status = 400, description = "Missing id, name or price"), (status = 401, description = "Unauthorized"), (status = 404, description = "Unknown id")))]
pub async fn update(
    State(state): State<ServerState>,
    ApiJson(record): ApiJson<Service>,
) -> Result<Json<Service>, ApiError> {
    record.validate()?;
    Ok(Json(state.store.update(record).await?))
}

#[utoipa::path(delete, path = "/services", tag = "services", params(("id" = String, Query, description = "Service id")), responses((status = 200, description = "Deleted (or already absent)"), (status = 400, description = "ID required"), (status = 401, description = "Unauthorized")))]
pub async fn remove(
    State(state): State<ServerState>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<Ack>, ApiError> {
    let id = params
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("ID required".into()))?;
    state.store.delete(&id).await?;
    Ok(Ack::ok())
}
