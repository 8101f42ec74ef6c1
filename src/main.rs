//! Theme router.
//!
//! Serves theme template routes built from permalink rules.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌────────────────────────────────────────────────────┐
//!                     │                    THEME ROUTER                     │
//!                     │                                                     │
//!   Client Request    │  ┌─────────┐    ┌──────────────┐    ┌────────────┐ │
//!   ──────────────────┼─▶│  http   │───▶│   registry   │───▶│ route table│ │
//!                     │  │ server  │    │   snapshot   │    │  dispatch  │ │
//!                     │  └─────────┘    └──────────────┘    └────────────┘ │
//!                     │                        ▲                            │
//!                     │                        │ replace entry              │
//!   Admin / config    │  ┌─────────┐    ┌──────┴───────┐    ┌────────────┐ │
//!   ──────────────────┼─▶│  admin  │───▶│  permalink   │───▶│  strategy  │ │
//!                     │  │ watcher │    │ pattern rules│    │  resolver  │ │
//!                     │  └─────────┘    └──────────────┘    └────────────┘ │
//!                     └────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `theme-router [config.toml]`

use std::net::SocketAddr;
use std::path::PathBuf;

use tokio::net::TcpListener;

use theme_router::config::loader::load_or_default;
use theme_router::config::watcher::ConfigWatcher;
use theme_router::http::{AppState, HttpServer};
use theme_router::lifecycle::{bootstrap, signals, Shutdown};
use theme_router::observability::{logging, metrics};
use theme_router::permalink::reload::run_reload_loop;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_or_default(config_path.as_deref())?;

    logging::init(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "theme-router starting");
    tracing::info!(
        bind_address = %config.server.bind_address,
        config_path = ?config_path,
        request_timeout_secs = config.server.request_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    // Every template must be routable before the listener is bound.
    let services = bootstrap(&config)?;
    let shutdown = Shutdown::new();

    let _watcher = match &config_path {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            let handle = watcher.run()?;
            tokio::spawn(run_reload_loop(
                services.patterns.clone(),
                services.registry.clone(),
                updates,
                shutdown.subscribe(),
            ));
            Some(handle)
        }
        None => None,
    };

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(&config, AppState::new(&services, &config.admin));
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    signals::wait_for_signal().await;
    shutdown.trigger();
    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
