use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};
use std::path::Path;
use tower_http::services::ServeDir;

/// Login Router Module
///
/// Routes of the role login service.
///
/// Anything not claimed by an explicit route is looked up in `static_dir`, so
/// the redirect targets handed out by `/login` (`/admin1.html`, `/seller.html`,
/// `/manu1.html`) resolve against the same directory as the sign-in form.
/// `ServeDir` refuses paths that escape the directory.
pub fn login_routes(static_dir: &Path) -> Router<AppState> {
    Router::new()
        // GET /
        // The sign-in form (login.html).
        .route("/", get(handlers::serve_login_page))
        // POST /login
        // Validates the body and returns the role and dashboard redirect.
        .route("/login", post(handlers::login))
        // GET /{*path}
        // Dashboard pages and assets.
        .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(false))
}
