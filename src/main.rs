//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Creates the in-memory link registry
//! - Starts the HTTP server with graceful shutdown support

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use shortlink::config::Config;
use shortlink::registry::{AppState, LinkRegistry};
use shortlink::route::create_app;

/// Application entry point
///
/// # Environment Variables
///
/// - `PORT` - Server port number (default: 8080)
/// - `BASE_URL` - Prefix for returned short URLs (default: "https://fer.link/")
/// - `RUST_LOG` - Log filter (default: "shortlink=debug,tower_http=debug")
#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shortlink=debug,tower_http=debug")),
        )
        .init();

    let config = Config::from_env();

    // Links live only as long as this process
    let registry = LinkRegistry::new();
    let state = AppState::new(registry.clone(), &config.base_url);

    let app = create_app(state).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.addr()).await?;

    tracing::info!(
        addr = %config.addr(),
        base_url = %config.base_url,
        "server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(registry.clone()))
        .await?;

    tracing::info!(links = registry.len(), "server stopped, in-memory links discarded");
    Ok(())
}

/// Resolves when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received
///
/// Returning triggers axum's graceful shutdown: the listener stops accepting
/// and in-flight shorten or redirect requests still see the registry. The
/// entry count is logged because nothing survives the exit.
async fn shutdown_signal(registry: LinkRegistry) {
    let received = tokio::select! {
        _ = ctrl_c() => "SIGINT",
        _ = terminate() => "SIGTERM",
    };

    tracing::info!(
        signal = received,
        links = registry.len(),
        "shutdown requested, draining in-flight requests"
    );
}

async fn ctrl_c() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            tracing::error!("failed to install SIGTERM handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
