use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt; // for .collect()
use serde_json::{Value, json};
use std::fs;
use supplychain_portal::{AppConfig, AppState, create_login_router};
use tempfile::{TempDir, tempdir};
use tower::ServiceExt; // for .oneshot()

// --- Test Utilities ---

/// A login router serving a throwaway static directory. The `TempDir` must be
/// kept alive for as long as the router is used.
fn login_app() -> (Router, TempDir) {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("login.html"), "<form id=\"login-form\"></form>").unwrap();
    fs::write(dir.path().join("seller.html"), "<h1>Seller dashboard</h1>").unwrap();

    let config = AppConfig {
        static_dir: dir.path().to_path_buf(),
        ..AppConfig::default()
    };
    (create_login_router(AppState::new(config)), dir)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn login(email: &str, password: &str) -> (StatusCode, Value) {
    let (app, _dir) = login_app();
    send(app, post_json("/login", json!({ "email": email, "password": password }))).await
}

// --- Successful Logins ---

#[tokio::test]
async fn test_known_users_get_role_and_redirect() {
    let cases = [
        ("admin@platform.com", "admin123", "admin", "/admin1.html"),
        ("seller@test.com", "seller123", "seller", "/seller.html"),
        ("manufacturer@test.com", "manu123", "manufacturer", "/manu1.html"),
    ];

    for (email, password, role, redirect) in cases {
        let (status, body) = login(email, password).await;
        assert_eq!(status, StatusCode::OK, "login failed for {email}");
        assert_eq!(
            body,
            json!({ "status": "success", "role": role, "redirect": redirect })
        );
    }
}

#[tokio::test]
async fn test_email_is_case_and_whitespace_insensitive() {
    let (status, body) = login("  SELLER@Test.com ", " seller123\n").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "seller");
}

// --- Rejected Credentials ---

#[tokio::test]
async fn test_wrong_password_and_unknown_user_look_identical() {
    let (wrong_status, wrong_body) = login("admin@platform.com", "admin124").await;
    let (unknown_status, unknown_body) = login("ghost@platform.com", "admin123").await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_body,
        json!({ "status": "error", "message": "Invalid email or password." })
    );
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn test_password_is_case_sensitive() {
    let (status, _) = login("admin@platform.com", "ADMIN123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// --- Validation ---

#[tokio::test]
async fn test_validation_messages() {
    let cases = [
        (json!({}), "Request body is missing or not JSON."),
        (json!({ "password": "x" }), "Email is required."),
        (json!({ "email": "  ", "password": "x" }), "Email is required."),
        (json!({ "email": "a@b.com" }), "Password is required."),
        (json!({ "email": "a@b.com", "password": "   " }), "Password is required."),
        (json!({ "email": "not-an-email", "password": "x" }), "Invalid email format."),
    ];

    for (payload, message) in cases {
        let (app, _dir) = login_app();
        let (status, body) = send(app, post_json("/login", payload.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
        assert_eq!(body, json!({ "status": "error", "message": message }));
    }
}

#[tokio::test]
async fn test_non_json_body_is_rejected_with_message() {
    let (app, _dir) = login_app();
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("email=admin%40platform.com&password=admin123"))
        .unwrap();

    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Request body is missing or not JSON.");
}

#[tokio::test]
async fn test_malformed_json_is_rejected_with_message() {
    let (app, _dir) = login_app();
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();

    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Request body is missing or not JSON.");
}

// --- Static Pages & Error Shapes ---

#[tokio::test]
async fn test_root_serves_login_page() {
    let (app, _dir) = login_app();
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&bytes).contains("login-form"));
}

#[tokio::test]
async fn test_dashboard_pages_are_served() {
    let (app, _dir) = login_app();
    let response = app
        .oneshot(Request::builder().uri("/seller.html").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"<h1>Seller dashboard</h1>");
}

#[tokio::test]
async fn test_missing_file_is_json_404() {
    let (app, _dir) = login_app();
    let (status, body) = send(
        app,
        Request::builder().uri("/nope.html").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "status": "error", "message": "Endpoint not found." }));
}

#[tokio::test]
async fn test_missing_login_page_is_json_404() {
    let dir = tempdir().unwrap();
    let config = AppConfig {
        static_dir: dir.path().to_path_buf(),
        ..AppConfig::default()
    };
    let app = create_login_router(AppState::new(config));

    let (status, body) = send(app, Request::builder().uri("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Endpoint not found.");
}

#[tokio::test]
async fn test_path_traversal_is_refused() {
    let (app, _dir) = login_app();
    let (status, _) = send(
        app,
        Request::builder()
            .uri("/../Cargo.toml")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_method_on_login_is_json_405() {
    let (app, _dir) = login_app();
    let (status, body) = send(
        app,
        Request::builder().uri("/login").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "status": "error", "message": "Method not allowed." }));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let (app, _dir) = login_app();
    let response = app
        .oneshot(post_json(
            "/login",
            json!({ "email": "seller@test.com", "password": "seller123" }),
        ))
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let (app, _dir) = login_app();
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/login")
        .header(header::ORIGIN, "http://frontend.test")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_cors_allow_list_permits_credentials() {
    let dir = tempdir().unwrap();
    let config = AppConfig {
        static_dir: dir.path().to_path_buf(),
        cors_origins: vec!["http://frontend.test".to_string()],
        ..AppConfig::default()
    };
    let app = create_login_router(AppState::new(config));

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/login")
        .header(header::ORIGIN, "http://frontend.test")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://frontend.test");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}
