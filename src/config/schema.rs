//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::template::TemplateKind;

/// Root configuration for the theme router.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ThemeRouterConfig {
    /// HTTP server settings.
    pub server: ServerConfig,

    /// Permalink rules the template routes are built from.
    pub permalink: PermalinkConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Admin API settings.
    pub admin: AdminConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8090").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8090".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Permalink rules, one per configurable part of the site.
///
/// `index`, `archives`, `tags` and `categories` are prefixes the strategies
/// extend; `post` and `single_page` are complete permalink patterns.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct PermalinkConfig {
    pub index: String,
    pub post: String,
    pub archives: String,
    pub tags: String,
    pub categories: String,
    pub single_page: String,
}

impl Default for PermalinkConfig {
    fn default() -> Self {
        Self {
            index: "/".to_string(),
            post: "/archives/{slug}".to_string(),
            archives: "/archives".to_string(),
            tags: "/tags".to_string(),
            categories: "/categories".to_string(),
            single_page: "/{slug}".to_string(),
        }
    }
}

impl PermalinkConfig {
    /// Name of the rule that governs `kind`.
    ///
    /// `tags`/`tag` and `categories`/`category` share a rule.
    pub fn field(kind: TemplateKind) -> &'static str {
        match kind {
            TemplateKind::Index => "index",
            TemplateKind::Post => "post",
            TemplateKind::Archives => "archives",
            TemplateKind::Tags | TemplateKind::Tag => "tags",
            TemplateKind::Categories | TemplateKind::Category => "categories",
            TemplateKind::SinglePage => "single_page",
        }
    }

    /// The rule that governs `kind`.
    pub fn rule(&self, kind: TemplateKind) -> &str {
        match kind {
            TemplateKind::Index => &self.index,
            TemplateKind::Post => &self.post,
            TemplateKind::Archives => &self.archives,
            TemplateKind::Tags | TemplateKind::Tag => &self.tags,
            TemplateKind::Categories | TemplateKind::Category => &self.categories,
            TemplateKind::SinglePage => &self.single_page,
        }
    }

    /// Replace the rule that governs `kind`.
    pub fn set_rule(&mut self, kind: TemplateKind, pattern: impl Into<String>) {
        let slot = match kind {
            TemplateKind::Index => &mut self.index,
            TemplateKind::Post => &mut self.post,
            TemplateKind::Archives => &mut self.archives,
            TemplateKind::Tags | TemplateKind::Tag => &mut self.tags,
            TemplateKind::Categories | TemplateKind::Category => &mut self.categories,
            TemplateKind::SinglePage => &mut self.single_page,
        };
        *slot = pattern.into();
    }

    /// Kinds whose rule differs between `self` and `other`, in enumeration order.
    pub fn changed_kinds(&self, other: &PermalinkConfig) -> Vec<TemplateKind> {
        TemplateKind::all()
            .filter(|kind| self.rule(*kind) != other.rule(*kind))
            .collect()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AdminConfig {
    /// Mount the admin API.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
        }
    }
}
