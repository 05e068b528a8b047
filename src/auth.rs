use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};
use std::convert::Infallible;

use crate::{error::AppError, repository::UserRecord, repository::UserRepository};

pub const MSG_MISSING_BODY: &str = "Request body is missing or not JSON.";
pub const MSG_EMAIL_REQUIRED: &str = "Email is required.";
pub const MSG_PASSWORD_REQUIRED: &str = "Password is required.";
pub const MSG_INVALID_EMAIL: &str = "Invalid email format.";

/// LoginCredentials
///
/// A login body that passed validation. `email` is trimmed and lowercased,
/// `password` is trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// LoginPayload Extractor
///
/// Reads the request body as JSON without ever rejecting the request. A body
/// that is absent, malformed, or sent without a JSON content type becomes
/// `None`, and `validate_login_input` turns that into a 400 with a readable
/// message rather than axum's plain-text rejection.
#[derive(Debug)]
pub struct LoginPayload(pub Option<Value>);

impl<S> FromRequest<S> for LoginPayload
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(LoginPayload(Some(value))),
            Err(rejection) => {
                tracing::debug!(%rejection, "login body is not usable JSON");
                Ok(LoginPayload(None))
            }
        }
    }
}

/// validate_login_input
///
/// Checks, in order: the body is a non-empty JSON object, the email is
/// non-blank, the password is non-blank, the email contains `@`. The first
/// failing check decides the message. Fields that are missing, null, or not
/// strings count as blank.
pub fn validate_login_input(body: Option<&Value>) -> Result<LoginCredentials, AppError> {
    let fields = match body {
        Some(Value::Object(fields)) if !fields.is_empty() => fields,
        _ => return Err(AppError::Validation(MSG_MISSING_BODY.to_string())),
    };

    let email = trimmed_field(fields, "email");
    let password = trimmed_field(fields, "password");

    if email.is_empty() {
        return Err(AppError::Validation(MSG_EMAIL_REQUIRED.to_string()));
    }
    if password.is_empty() {
        return Err(AppError::Validation(MSG_PASSWORD_REQUIRED.to_string()));
    }
    if !email.contains('@') {
        return Err(AppError::Validation(MSG_INVALID_EMAIL.to_string()));
    }

    Ok(LoginCredentials {
        email: email.to_lowercase(),
        password: password.to_string(),
    })
}

fn trimmed_field<'a>(fields: &'a Map<String, Value>, name: &str) -> &'a str {
    fields.get(name).and_then(Value::as_str).unwrap_or("").trim()
}

/// authenticate
///
/// Resolves validated credentials against the user table. Unknown email and
/// wrong password produce the same error so callers cannot tell which
/// accounts exist.
pub async fn authenticate(
    repo: &dyn UserRepository,
    credentials: &LoginCredentials,
) -> Result<UserRecord, AppError> {
    match repo.find_by_email(&credentials.email).await {
        Some(user) if user.password == credentials.password => Ok(user),
        _ => Err(AppError::InvalidCredentials),
    }
}
