//! Admin API.
//!
//! ```text
//! GET  /admin/status                         version, readiness
//! GET  /admin/routes                         published handlers
//! GET  /admin/permalinks                     current permalink rules
//! POST /admin/templates/{template}/rebuild   rebuild one template
//! PUT  /admin/permalinks/{template}          change a rule, rebuild affected templates
//! ```
//!
//! Every route requires `Authorization: Bearer <admin.api_key>`.

pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/routes", get(get_routes))
        .route("/admin/permalinks", get(get_permalinks))
        .route("/admin/permalinks/{template}", put(set_permalink))
        .route("/admin/templates/{template}/rebuild", post(rebuild_template))
        .route_layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}
