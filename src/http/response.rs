//! Response bodies and error mapping.
//!
//! # Responsibilities
//! - Serialize dispatch results
//! - Map each registry error kind to its own status code and error tag
//!
//! # Design Decisions
//! - Every error body is `{ "error": tag, "message": text }`
//! - Unknown templates are client errors, construction failures server errors

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::permalink::reload::ReloadError;
use crate::routing::{Dispatch, RegistryError};

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

pub fn error_response(status: StatusCode, error: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error,
            message: message.into(),
        }),
    )
        .into_response()
}

/// Body returned when a request path resolves to a template.
#[derive(Debug, Serialize)]
pub struct DispatchBody {
    pub template: String,
    pub pattern: String,
    pub route: String,
    pub params: BTreeMap<String, String>,
}

impl From<Dispatch> for DispatchBody {
    fn from(dispatch: Dispatch) -> Self {
        Self {
            template: dispatch.handler.template().to_string(),
            pattern: dispatch.handler.pattern().to_string(),
            route: dispatch.route,
            params: dispatch.params,
        }
    }
}

impl RegistryError {
    fn status_and_tag(&self) -> (StatusCode, &'static str) {
        match self {
            RegistryError::InvalidTemplateName(_) => (StatusCode::BAD_REQUEST, "invalid_template_name"),
            RegistryError::TemplateNotFound(_) => (StatusCode::NOT_FOUND, "template_not_found"),
            RegistryError::HandlerConstructionFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "handler_construction_failed")
            }
            RegistryError::Strategy { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "route_build_failed"),
            RegistryError::Pattern(_) => (StatusCode::UNPROCESSABLE_ENTITY, "pattern_unavailable"),
            RegistryError::AlreadyInitialized => (StatusCode::CONFLICT, "already_initialized"),
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let (status, tag) = self.status_and_tag();
        error_response(status, tag, self.to_string())
    }
}

impl IntoResponse for ReloadError {
    fn into_response(self) -> Response {
        match self {
            ReloadError::Invalid(_) => {
                error_response(StatusCode::UNPROCESSABLE_ENTITY, "invalid_permalink", self.to_string())
            }
            ReloadError::Registry(e) => e.into_response(),
        }
    }
}
