// File: services/salomo_backend/src/main.rs
use salomo_backend::{app_state::AppState, build_app};
use salomo_common::logging;
use salomo_config::load_config;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("[server] shutdown signal received");
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let config = match load_config() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            logging::log_error(e, "[config] refusing to start");
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::from_config(config.clone()) {
        Ok(state) => state,
        Err(e) => {
            logging::log_error(e, "[stripe] failed to initialise Stripe client");
            return ExitCode::FAILURE;
        }
    };

    let app = build_app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("[server] failed to bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };
    info!("[server] listening on port {}", config.server.port);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("[server] {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
