//! Metrics collection and exposition.
//!
//! # Metrics
//! - `theme_router_route_builds_total` (counter): handler builds by template, outcome
//! - `theme_router_route_table_size` (gauge): entries in the published table
//! - `theme_router_dispatch_total` (counter): dispatched requests by template
//! - `theme_router_dispatch_duration_seconds` (histogram): dispatch latency
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Prometheus exporter is optional (`observability.metrics_enabled`)

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_route_build(template: &str, outcome: &'static str) {
    ::metrics::counter!(
        "theme_router_route_builds_total",
        "template" => template.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_table_size(size: usize) {
    ::metrics::gauge!("theme_router_route_table_size").set(size as f64);
}

/// Record a dispatched request; `template` is `None` when nothing matched.
pub fn record_dispatch(template: Option<&str>, start: Instant) {
    let template = template.unwrap_or("none").to_string();
    ::metrics::counter!("theme_router_dispatch_total", "template" => template).increment(1);
    ::metrics::histogram!("theme_router_dispatch_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}
