use axum::extract::FromRequest;

use crate::errors::ApiError;

/// `axum::Json` whose rejections answer as [`ApiError`] JSON bodies.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
