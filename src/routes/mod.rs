/// Router Module Index
///
/// One router per backend. Both are assembled into full applications (state,
/// CORS, tracing) by `create_api_router` and `create_login_router` in the crate root.

/// SupplyChain API service: metadata, health, and the login include.
pub mod api;

/// Role login service: credential check plus the static sign-in pages.
pub mod login;
