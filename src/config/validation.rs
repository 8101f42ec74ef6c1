//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check every permalink rule compiles as a route pattern
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ThemeRouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{PermalinkConfig, ThemeRouterConfig};
use crate::routing::matcher::{PatternParseError, RoutePattern};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: `{value}` is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("server.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("permalink.{field}: {source}")]
    InvalidPattern {
        field: &'static str,
        source: PatternParseError,
    },

    #[error("permalink.{field} must capture at least one parameter, got `{value}`")]
    MissingParameter { field: &'static str, value: String },

    #[error("permalink.{field} is a prefix and must not capture parameters, got `{value}`")]
    ParameterInPrefix { field: &'static str, value: String },

    #[error("permalink.{field} must not be the site root")]
    RootPrefix { field: &'static str },

    #[error("admin.api_key must not be empty when the admin API is enabled")]
    EmptyApiKey,
}

/// Validate a complete configuration.
pub fn validate_config(config: &ThemeRouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "server.bind_address", &config.server.bind_address);
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }
    if config.admin.enabled && config.admin.api_key.trim().is_empty() {
        errors.push(ValidationError::EmptyApiKey);
    }
    if let Err(mut permalink) = validate_permalink(&config.permalink) {
        errors.append(&mut permalink);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate permalink rules on their own (admin edits, reloads).
pub fn validate_permalink(rules: &PermalinkConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_prefix(&mut errors, "index", &rules.index, true);
    check_prefix(&mut errors, "archives", &rules.archives, false);
    check_prefix(&mut errors, "tags", &rules.tags, false);
    check_prefix(&mut errors, "categories", &rules.categories, false);
    check_permalink(&mut errors, "post", &rules.post);
    check_permalink(&mut errors, "single_page", &rules.single_page);

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn compile(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) -> Option<RoutePattern> {
    match RoutePattern::parse(value) {
        Ok(pattern) => Some(pattern),
        Err(source) => {
            errors.push(ValidationError::InvalidPattern { field, source });
            None
        }
    }
}

fn check_prefix(errors: &mut Vec<ValidationError>, field: &'static str, value: &str, allow_root: bool) {
    let Some(pattern) = compile(errors, field, value) else {
        return;
    };
    if pattern.has_params() {
        errors.push(ValidationError::ParameterInPrefix {
            field,
            value: value.to_string(),
        });
    } else if !allow_root && value == "/" {
        errors.push(ValidationError::RootPrefix { field });
    }
}

fn check_permalink(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    let Some(pattern) = compile(errors, field, value) else {
        return;
    };
    if !pattern.has_params() {
        errors.push(ValidationError::MissingParameter {
            field,
            value: value.to_string(),
        });
    }
}
