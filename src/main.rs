//! mbServer binary entry point
//!
//! Starts the axum HTTP server with structured logging and graceful
//! shutdown on SIGINT/SIGTERM. The same router can be embedded without a
//! listener via `mbserver::create_router`.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use mbserver::{create_router, AppState, EventStore, FsObjectSink, ServerConfig, SystemHost};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::from_env();

    let state = Arc::new(AppState::new(
        Arc::new(EventStore::new()),
        Arc::new(FsObjectSink::new(&config.mirror_path)),
        Arc::new(SystemHost::new()),
    ));
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, mirror_path = %config.mirror_path.display(), "starting mbserver");

    let listener = TcpListener::bind(addr)
        .await
        .expect("failed to bind to address - is another process using this port?");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("mbserver shut down");
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
