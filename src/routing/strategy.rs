//! Route strategy contract.
//!
//! A strategy turns a template identifier and its permalink pattern into a
//! [`TemplateHandler`]. There is one strategy per [`TemplateKind`], selected
//! by the [`StrategyResolver`].
//!
//! [`TemplateKind`]: crate::template::TemplateKind
//! [`StrategyResolver`]: crate::routing::resolver::StrategyResolver

use thiserror::Error;

use crate::routing::handler::TemplateHandler;
use crate::routing::matcher::PatternParseError;

/// Errors a strategy reports instead of returning an unusable handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    #[error("invalid route pattern: {0}")]
    InvalidPattern(#[from] PatternParseError),
}

/// Builds the handler for one template kind.
pub trait RouteStrategy: Send + Sync + std::fmt::Debug {
    /// Build a ready-to-publish handler for `template` using `pattern`.
    fn build_handler(&self, template: &str, pattern: &str) -> Result<TemplateHandler, StrategyError>;
}
