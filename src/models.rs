use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Domain ---

/// Role
///
/// The dashboard a user is routed to after signing in. Serialized lowercase,
/// which is also the form the frontend switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    Admin,
    Seller,
    Manufacturer,
}

/// --- Request Payloads (Input Schemas) ---

/// LoginRequest
///
/// Documented shape of the `POST /login` body. The handler does not bind to
/// this struct directly: the body is inspected as loose JSON so that missing or
/// mistyped fields surface as 400 validation messages instead of extractor
/// rejections.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginRequest {
    #[schema(example = "seller@test.com")]
    pub email: String,
    #[schema(example = "seller123")]
    pub password: String,
}

// --- Response Payloads ---

/// LoginResponse
///
/// Successful sign-in. `status` is always `"success"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginResponse {
    #[schema(example = "success")]
    pub status: String,
    pub role: Role,
    #[schema(example = "/seller.html")]
    pub redirect: String,
}

impl LoginResponse {
    pub fn success(role: Role, redirect: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            role,
            redirect: redirect.into(),
        }
    }
}

/// ErrorResponse
///
/// Body of every 4xx response. `status` is always `"error"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorResponse {
    #[schema(example = "error")]
    pub status: String,
    #[schema(example = "Invalid email or password.")]
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

/// InternalErrorResponse
///
/// Body returned by the global exception handler when a handler panics.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InternalErrorResponse {
    pub success: bool,
    pub message: String,
    pub error: String,
}

/// EndpointMap
///
/// Discovery links advertised by the root endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EndpointMap {
    pub docs: String,
    pub redoc: String,
    pub openapi: String,
    pub health: String,
    pub login: String,
}

/// ApiInfo
///
/// Service metadata returned by `GET /` on the API service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub status: String,
    /// UTC, ISO-8601.
    pub timestamp: String,
    pub endpoints: EndpointMap,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub timestamp: String,
}
