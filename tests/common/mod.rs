//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use theme_router::config::ThemeRouterConfig;
use theme_router::http::{build_router, AppState};
use theme_router::lifecycle::{bootstrap, Services};
use theme_router::permalink::{PatternError, PatternSource};
use theme_router::TemplateKind;

pub const API_KEY: &str = "test-admin-key";

pub fn test_config() -> ThemeRouterConfig {
    let mut config = ThemeRouterConfig::default();
    config.admin.api_key = API_KEY.to_string();
    config
}

/// Bootstrapped services and a router over them.
pub fn test_app(config: &ThemeRouterConfig) -> (Services, Router) {
    let services = bootstrap(config).expect("bootstrap failed");
    let router = build_router(config, AppState::new(&services, &config.admin));
    (services, router)
}

/// Send a request through the router and decode the JSON body.
pub async fn send(router: &Router, method: Method, uri: &str, auth: bool, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if auth {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {API_KEY}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Pattern source answering from a fixed map.
pub struct FixedPatterns(pub HashMap<TemplateKind, String>);

impl FixedPatterns {
    /// Defaults for every kind, overridden by `overrides`.
    pub fn with(overrides: &[(TemplateKind, &str)]) -> Self {
        let rules = theme_router::config::PermalinkConfig::default();
        let mut map: HashMap<_, _> = TemplateKind::all()
            .map(|kind| (kind, rules.rule(kind).to_string()))
            .collect();
        for (kind, pattern) in overrides {
            map.insert(*kind, pattern.to_string());
        }
        Self(map)
    }
}

impl PatternSource for FixedPatterns {
    fn pattern(&self, kind: TemplateKind) -> Result<String, PatternError> {
        self.0.get(&kind).cloned().ok_or(PatternError::Missing(kind))
    }
}
