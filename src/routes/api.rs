use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// API Router Module
///
/// Routes of the SupplyChain API service. The Swagger UI and the OpenAPI
/// document are merged on top of this router in `create_api_router`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // GET /
        // Service name, version and discovery links.
        .route("/", get(handlers::api_root))
        // GET /api/health
        // Liveness check; also reports whether the database stub is connected.
        .route(handlers::HEALTH_PATH, get(handlers::health))
        // POST /api/login
        // The same credential check the login service serves at /login.
        .route(handlers::API_LOGIN_PATH, post(handlers::login))
        .fallback(handlers::not_found)
}
