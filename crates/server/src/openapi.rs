use axum::Json;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct ServiceDoc {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Display text; "Consultar" means price on request.
    pub price: String,
}

#[derive(ToSchema)]
pub struct ServiceInputDoc {
    pub name: String,
    pub description: Option<String>,
    pub price: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::services::list,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::services::remove,
        crate::routes::auth::status,
        crate::routes::auth::login,
        crate::routes::auth::logout,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            ServiceDoc,
            ServiceInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "services"),
        (name = "auth")
    )
)]
pub struct ApiDoc;

pub async fn spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        assert_eq!(paths, vec!["/auth", "/health", "/services"]);
        let services = &doc.paths.paths["/services"];
        assert_eq!(services.operations.len(), 4);
    }
}
