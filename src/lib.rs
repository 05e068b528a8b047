use axum::{
    Router,
    extract::FromRef,
    http::{HeaderName, HeaderValue},
    middleware,
};
use std::{any, sync::Arc};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowMethods, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod lifecycle;
pub mod models;
pub mod repository;
pub mod telemetry;

// One router per backend.
pub mod routes;
use routes::{api, login};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use database::{Database, DatabaseState, InMemoryDatabase};
pub use repository::{RepositoryState, StaticUserRepository, UserRepository};

/// ApiDoc
///
/// OpenAPI document for the SupplyChain API service, served at
/// `/api/openapi.json` and rendered by the Swagger UI at `/api/docs` and by
/// ReDoc at `/api/redoc`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SupplyChain AI API",
        version = "1.0.0",
        description = "AI-Powered Supplier Risk Management API"
    ),
    paths(handlers::api_root, handlers::health, handlers::login),
    components(
        schemas(
            models::Role, models::LoginRequest, models::LoginResponse, models::ErrorResponse,
            models::ApiInfo, models::EndpointMap, models::HealthResponse,
        )
    ),
    tags(
        (name = "supplychain", description = "SupplyChain AI API")
    )
)]
pub struct ApiDoc;

/// AppState
///
/// The single shared container for both servers. Handlers pull only the
/// component they need through the `FromRef` impls below.
#[derive(Clone)]
pub struct AppState {
    /// User table consulted by the login handler.
    pub users: RepositoryState,
    /// Connection stub whose lifecycle is driven by the startup/shutdown hooks.
    pub database: DatabaseState,
    /// The loaded, immutable configuration.
    pub config: AppConfig,
}

impl AppState {
    /// State wired with the demo user table and the in-memory database.
    pub fn new(config: AppConfig) -> Self {
        Self {
            users: Arc::new(StaticUserRepository::new()),
            database: Arc::new(InMemoryDatabase::new()),
            config,
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.users.clone()
    }
}

impl FromRef<AppState> for DatabaseState {
    fn from_ref(app_state: &AppState) -> DatabaseState {
        app_state.database.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_api_router
///
/// Assembles the SupplyChain API service: documentation (Swagger UI, ReDoc and
/// the raw OpenAPI document) and the API routes, wrapped by `with_api_layers`.
pub fn create_api_router(state: AppState) -> Router {
    let routes = Router::new()
        .merge(SwaggerUi::new(handlers::DOCS_PATH).url(handlers::OPENAPI_PATH, ApiDoc::openapi()))
        .merge(Redoc::with_url(handlers::REDOC_PATH, ApiDoc::openapi()))
        .merge(api::api_routes());

    with_api_layers(routes, state)
}

/// with_api_layers
///
/// Applies the API service's middleware stack to `routes`: JSON 404/405
/// bodies, the global exception handler (panic detail only when
/// `config.debug` is set), request correlation, tracing and CORS.
pub fn with_api_layers(routes: Router<AppState>, state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let debug = state.config.debug;

    let base_router = routes
        .with_state(state)
        .layer(middleware::map_response(error::normalize_error_response))
        // Global exception handler: a panicking handler becomes a JSON 500.
        .layer(CatchPanicLayer::custom(move |payload: Box<dyn any::Any + Send + 'static>| {
            error::panic_response(payload, debug)
        }));

    with_observability(base_router).layer(cors)
}

/// create_login_router
///
/// Assembles the role login service: `/login`, the sign-in page and the static
/// dashboards, with every 404/405 rendered as the JSON error shape.
pub fn create_login_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let static_dir = state.config.static_dir.clone();

    let base_router = login::login_routes(&static_dir)
        .with_state(state)
        .layer(middleware::map_response(error::normalize_error_response));

    with_observability(base_router).layer(cors)
}

/// cors_layer
///
/// Without an allow-list every origin is accepted and credentials are not.
/// With an allow-list only those origins are accepted and credentials are allowed.
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::new()
            .allow_methods(Any)
            .allow_origin(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    // Wildcards are not allowed alongside credentials, so mirror the request instead.
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// with_observability
///
/// Request correlation and tracing, shared by both servers. Every request gets
/// an `x-request-id` (generated when absent), a tracing span carrying it, and
/// the id echoed back on the response.
fn with_observability(router: Router) -> Router {
    let x_request_id = HeaderName::from_static("x-request-id");

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(trace_span_logger)
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .latency_unit(tower_http::LatencyUnit::Millis),
                    ),
            )
            .layer(PropagateRequestIdLayer::new(x_request_id)),
    )
}

/// trace_span_logger
///
/// Span factory for `TraceLayer`: method, URI and the request id, so every log
/// line of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
