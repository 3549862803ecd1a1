use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use service::auth::{SessionPolicy, SESSION_MARKER};
use tracing::{info, warn};

use super::Ack;
use crate::errors::ApiError;
use crate::extract::ApiJson;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
}

fn session_cookie(policy: &SessionPolicy) -> Cookie<'static> {
    let secs = i64::try_from(policy.ttl.as_secs()).unwrap_or(i64::MAX);
    Cookie::build((policy.cookie_name.clone(), SESSION_MARKER))
        .path("/")
        .http_only(true)
        .secure(policy.secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(secs))
        .build()
}

fn presented_marker<'a>(jar: &'a CookieJar, policy: &SessionPolicy) -> Option<&'a str> {
    jar.get(&policy.cookie_name).map(|c| c.value())
}

#[utoipa::path(get, path = "/auth", tag = "auth", responses((status = 200, description = "Session present"), (status = 401, description = "No session")))]
pub async fn status(State(state): State<ServerState>, jar: CookieJar) -> (StatusCode, Json<SessionStatus>) {
    let authenticated = state.gate.is_authenticated(presented_marker(&jar, state.gate.policy()));
    let code = if authenticated { StatusCode::OK } else { StatusCode::UNAUTHORIZED };
    (code, Json(SessionStatus { authenticated }))
}

#[utoipa::path(post, path = "/auth", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in, session cookie set"), (status = 401, description = "Invalid credentials")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    ApiJson(input): ApiJson<LoginInput>,
) -> Result<(CookieJar, Json<Ack>), ApiError> {
    if !state.gate.authenticate(&input.username, &input.password) {
        return Err(ApiError::InvalidCredentials);
    }
    let jar = jar.add(session_cookie(state.gate.policy()));
    Ok((jar, Ack::ok()))
}

#[utoipa::path(delete, path = "/auth", tag = "auth", responses((status = 200, description = "Session cleared")))]
pub async fn logout(State(state): State<ServerState>, jar: CookieJar) -> (CookieJar, Json<Ack>) {
    let removal = Cookie::build((state.gate.policy().cookie_name.clone(), "")).path("/").build();
    let jar = jar.remove(removal);
    info!("admin_logout");
    (jar, Ack::ok())
}

/// Middleware: reject mutating requests that carry no session marker.
pub async fn require_admin_session(
    State(state): State<ServerState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.gate.is_authenticated(presented_marker(&jar, state.gate.policy())) {
        warn!(method = %req.method(), path = %req.uri().path(), "missing admin session");
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn session_cookie_follows_policy() {
        let policy = SessionPolicy { cookie_name: "admin_token".into(), ttl: Duration::from_secs(86_400), secure: true };
        let cookie = session_cookie(&policy);
        assert_eq!(cookie.name(), "admin_token");
        assert_eq!(cookie.value(), SESSION_MARKER);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(time::Duration::hours(24)));
        assert_eq!(cookie.path(), Some("/"));
    }
}
