use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::any::Any;

use crate::models::{ErrorResponse, InternalErrorResponse};

/// AppError
///
/// Every failure a handler can report. Each variant maps to exactly one status
/// code, and all of them render the `{"status":"error","message":...}` body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Endpoint not found.")]
    NotFound,

    #[error("Method not allowed.")]
    MethodNotAllowed,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Internal(detail) => {
                tracing::error!("Internal server error: {}", detail);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// normalize_error_response
///
/// Rewrites the bare 404/405 responses that axum's router and the static file
/// service produce (no body, no content type) into the JSON error shape, so
/// clients see one error format regardless of which layer rejected them.
pub async fn normalize_error_response(response: Response) -> Response {
    if response.headers().contains_key(header::CONTENT_TYPE) {
        return response;
    }

    match response.status() {
        StatusCode::NOT_FOUND => AppError::NotFound.into_response(),
        StatusCode::METHOD_NOT_ALLOWED => AppError::MethodNotAllowed.into_response(),
        _ => response,
    }
}

/// panic_response
///
/// Global exception handler for the API service, installed through
/// `CatchPanicLayer`. The panic payload is only echoed back when `debug` is on.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>, debug: bool) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!("Unhandled exception: {}", detail);

    let body = InternalErrorResponse {
        success: false,
        message: "Internal server error".to_string(),
        error: if debug {
            detail
        } else {
            "An error occurred".to_string()
        },
    };

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
