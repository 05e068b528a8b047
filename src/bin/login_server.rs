use supplychain_portal::{AppState, config::AppConfig, create_login_router, lifecycle, telemetry};
use tokio::net::TcpListener;

/// Entry point of the role login service.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let config = AppConfig::load()?;

    telemetry::init_tracing(config.env);

    let addr = config.login_addr;
    if !config.static_dir.join("login.html").is_file() {
        tracing::warn!(
            "No login.html in {}; GET / will answer 404",
            config.static_dir.display()
        );
    }

    let app = create_login_router(AppState::new(config));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Login service listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(lifecycle::shutdown_signal())
        .await?;

    tracing::info!("Login service stopped");
    Ok(())
}
