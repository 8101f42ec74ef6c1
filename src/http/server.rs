//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatch fallback and admin routes
//! - Wire up middleware (request ID, tracing, timeout)
//! - Dispatch every request through a route table snapshot
//! - Bind server to listener, stop on shutdown signal

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin;
use crate::config::{AdminConfig, ThemeRouterConfig};
use crate::http::request::request_id;
use crate::http::response::{error_response, DispatchBody};
use crate::lifecycle::startup::Services;
use crate::observability::metrics;
use crate::permalink::ConfigPatternSource;
use crate::routing::TemplateRouteRegistry;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<TemplateRouteRegistry>,
    pub patterns: Arc<ConfigPatternSource>,
    pub admin_api_key: Arc<str>,
}

impl AppState {
    pub fn new(services: &Services, admin: &AdminConfig) -> Self {
        Self {
            registry: Arc::clone(&services.registry),
            patterns: Arc::clone(&services.patterns),
            admin_api_key: Arc::from(admin.api_key.as_str()),
        }
    }
}

/// HTTP server for the theme router.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &ThemeRouterConfig, state: AppState) -> Self {
        Self {
            router: build_router(config, state),
        }
    }

    /// The fully layered router (used by tests to drive requests directly).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &ThemeRouterConfig, state: AppState) -> Router {
    let mut router: Router<AppState> = Router::new();
    if config.admin.enabled {
        router = router.merge(admin::setup_admin_router(state.clone()));
    }

    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_secs)));

    router.fallback(dispatch_handler).with_state(state).layer(middleware)
}

fn is_admin_path(path: &str) -> bool {
    path == "/admin" || path.starts_with("/admin/")
}

/// Resolve the request path to a template through the current table.
async fn dispatch_handler(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let start = Instant::now();
    let path = uri.path();
    let request_id = request_id(&headers);

    if is_admin_path(path) {
        return error_response(StatusCode::NOT_FOUND, "not_found", format!("no admin endpoint at {path}"));
    }

    let table = state.registry.snapshot();
    match table.dispatch(path) {
        Some(found) => {
            metrics::record_dispatch(Some(found.handler.template()), start);
            tracing::debug!(
                request_id = %request_id,
                path = %path,
                template = found.handler.template(),
                route = %found.route,
                "Request dispatched"
            );
            Json(DispatchBody::from(found)).into_response()
        }
        None => {
            metrics::record_dispatch(None, start);
            tracing::debug!(request_id = %request_id, path = %path, "No template route matched");
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({
                    "error": "no template route matched",
                    "path": path,
                })),
            )
                .into_response()
        }
    }
}
