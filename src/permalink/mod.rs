//! Permalink pattern source.
//!
//! # Data Flow
//! ```text
//! [permalink] rules (config file / admin API)
//!     → ConfigPatternSource (ArcSwap<PermalinkConfig>)
//!     → PatternSource::pattern(kind) during route construction
//!
//! On rule change:
//!     reload.rs validates new rules
//!     → swaps them into the source
//!     → rebuilds every template whose rule changed
//! ```
//!
//! # Design Decisions
//! - Lock-free reads; rules replaced as a whole
//! - The source only hands out pattern strings, strategies interpret them

pub mod reload;

use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;

use crate::config::PermalinkConfig;
use crate::template::TemplateKind;

/// Errors raised while looking up a permalink pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("no permalink rule configured for template `{0}`")]
    Missing(TemplateKind),
}

/// Supplies the permalink pattern for a template kind.
pub trait PatternSource: Send + Sync {
    fn pattern(&self, kind: TemplateKind) -> Result<String, PatternError>;
}

/// Pattern source backed by the `[permalink]` config section.
#[derive(Debug)]
pub struct ConfigPatternSource {
    rules: ArcSwap<PermalinkConfig>,
}

impl ConfigPatternSource {
    pub fn new(rules: PermalinkConfig) -> Self {
        Self {
            rules: ArcSwap::from_pointee(rules),
        }
    }

    /// Current rules.
    pub fn rules(&self) -> Arc<PermalinkConfig> {
        self.rules.load_full()
    }

    /// Install `rules`, returning the ones they replace.
    pub fn replace(&self, rules: PermalinkConfig) -> Arc<PermalinkConfig> {
        self.rules.swap(Arc::new(rules))
    }
}

impl Default for ConfigPatternSource {
    fn default() -> Self {
        Self::new(PermalinkConfig::default())
    }
}

impl PatternSource for ConfigPatternSource {
    fn pattern(&self, kind: TemplateKind) -> Result<String, PatternError> {
        let rules = self.rules.load();
        let rule = rules.rule(kind).trim();
        if rule.is_empty() {
            return Err(PatternError::Missing(kind));
        }
        Ok(rule.to_string())
    }
}
