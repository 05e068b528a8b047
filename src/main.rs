use supplychain_portal::{AppState, config::AppConfig, lifecycle, telemetry};

/// main
///
/// Entry point of the SupplyChain API service: configuration, logging, the
/// startup hook, the HTTP server, and the shutdown hook once the server drains.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Configuration & Environment Loading (Fail-Fast)
    dotenv::dotenv().ok();
    let config = AppConfig::load()?;

    // 2. Logging, format selected by APP_ENV.
    telemetry::init_tracing(config.env);
    tracing::info!("Application starting in {:?} mode", config.env);

    // 3. Unified State Assembly
    let app_state = AppState::new(config);
    let addr = app_state.config.api_addr;

    // 4. Bind, startup hook, serve until signalled, shutdown hook.
    lifecycle::run_api_service(addr, app_state, lifecycle::shutdown_signal()).await?;
    Ok(())
}
