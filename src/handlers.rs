use crate::{
    auth::{self, LoginPayload},
    config::AppConfig,
    database::DatabaseState,
    error::AppError,
    models::{ApiInfo, EndpointMap, ErrorResponse, HealthResponse, LoginRequest, LoginResponse},
    repository::RepositoryState,
};
use axum::{Json, extract::State, response::Html};
use chrono::{SecondsFormat, Utc};
use std::io::ErrorKind;

pub const API_NAME: &str = "SupplyChain AI API";
pub const API_VERSION: &str = "1.0.0";
pub const API_DESCRIPTION: &str = "AI-Powered Supplier Risk Management API";

pub const DOCS_PATH: &str = "/api/docs";
pub const REDOC_PATH: &str = "/api/redoc";
pub const OPENAPI_PATH: &str = "/api/openapi.json";
pub const HEALTH_PATH: &str = "/api/health";
pub const API_LOGIN_PATH: &str = "/api/login";

fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

// --- Handlers ---

/// login
///
/// Validates the JSON body, then checks the credentials against the user table.
/// The role login service exposes this at `/login`, the API service at `/api/login`.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 400, description = "Malformed body or fields", body = ErrorResponse),
        (status = 401, description = "Unknown email or wrong password", body = ErrorResponse)
    )
)]
pub async fn login(
    State(repo): State<RepositoryState>,
    LoginPayload(body): LoginPayload,
) -> Result<Json<LoginResponse>, AppError> {
    let credentials = auth::validate_login_input(body.as_ref()).inspect_err(|e| {
        tracing::info!("Rejected login request: {}", e);
    })?;

    tracing::info!("Login attempt for {}", credentials.email);

    let user = auth::authenticate(repo.as_ref(), &credentials)
        .await
        .inspect_err(|_| {
            tracing::warn!("Failed login for {}", credentials.email);
        })?;

    tracing::info!("Login succeeded for {} as {:?}", user.email, user.role);
    Ok(Json(LoginResponse::success(user.role, user.redirect)))
}

/// api_root
///
/// Service metadata and discovery links for the API service.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service information", body = ApiInfo))
)]
pub async fn api_root() -> Json<ApiInfo> {
    Json(ApiInfo {
        name: API_NAME.to_string(),
        version: API_VERSION.to_string(),
        description: API_DESCRIPTION.to_string(),
        status: "running".to_string(),
        timestamp: now_iso8601(),
        endpoints: EndpointMap {
            docs: DOCS_PATH.to_string(),
            redoc: REDOC_PATH.to_string(),
            openapi: OPENAPI_PATH.to_string(),
            health: HEALTH_PATH.to_string(),
            login: API_LOGIN_PATH.to_string(),
        },
    })
}

/// health
///
/// Liveness for monitoring and load balancers. Reports the database
/// connection flag but always answers 200 while the process is serving.
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health(State(db): State<DatabaseState>) -> Json<HealthResponse> {
    let database = if db.is_connected() {
        "connected"
    } else {
        "disconnected"
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        database: database.to_string(),
        timestamp: now_iso8601(),
    })
}

/// serve_login_page
///
/// `GET /` on the login service: the sign-in form from the static directory.
pub async fn serve_login_page(State(config): State<AppConfig>) -> Result<Html<String>, AppError> {
    let path = config.static_dir.join("login.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Ok(Html(page)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("login page missing at {}", path.display());
            Err(AppError::NotFound)
        }
        Err(e) => Err(AppError::Internal(format!(
            "failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Fallback for paths no route claims.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
