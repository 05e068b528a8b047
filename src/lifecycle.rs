use std::{future::Future, io, net::SocketAddr};

use tokio::net::TcpListener;

use crate::{AppState, create_api_router, handlers};

const BANNER: &str = "==================================================";

/// on_startup
///
/// Runs once before the API service accepts connections: connects the
/// database and announces where the documentation lives.
pub async fn on_startup(state: &AppState) {
    tracing::info!("{}", BANNER);
    tracing::info!("{} Starting Up", handlers::API_NAME);
    tracing::info!("{}", BANNER);

    state.database.connect().await;
    tracing::info!("Database connected (in-memory)");

    let addr = state.config.api_addr;
    tracing::info!(
        "API Documentation: http://localhost:{}{}",
        addr.port(),
        handlers::DOCS_PATH
    );
    tracing::info!(
        "ReDoc Documentation: http://localhost:{}{}",
        addr.port(),
        handlers::REDOC_PATH
    );
    tracing::info!("{}", BANNER);
}

/// on_shutdown
///
/// Runs once after the server has drained in-flight requests.
pub async fn on_shutdown(state: &AppState) {
    tracing::info!("{}", BANNER);
    tracing::info!("{} Shutting Down", handlers::API_NAME);
    tracing::info!("{}", BANNER);

    state.database.disconnect().await;
    tracing::info!("Database disconnected");

    tracing::info!("Shutdown complete");
}

/// run_api_service
///
/// Binds `addr`, runs the startup hook, serves the API router until `shutdown`
/// resolves, then runs the shutdown hook. A failed bind returns before any hook
/// runs; a server error still goes through `on_shutdown`.
pub async fn run_api_service<F>(addr: SocketAddr, state: AppState, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    on_startup(&state).await;

    let app = create_api_router(state.clone());
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;

    on_shutdown(&state).await;
    served
}

/// shutdown_signal
///
/// Resolves on SIGINT or SIGTERM (ctrl-c on other platforms). Passed to
/// `axum::serve(..).with_graceful_shutdown`.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                tracing::warn!("Could not register unix signal handlers, falling back to ctrl-c");
                wait_for_ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        wait_for_ctrl_c().await;
    }

    tracing::info!("Shutdown signal received");
}

async fn wait_for_ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
