//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the permalink pattern source and strategy resolver
//! - Construct the route registry with both injected
//! - Register every template before the listener is bound
//!
//! # Design Decisions
//! - Fail fast: any registration error is fatal
//! - Runs exactly once per process, before traffic is accepted

use std::sync::Arc;

use thiserror::Error;

use crate::config::ThemeRouterConfig;
use crate::permalink::ConfigPatternSource;
use crate::routing::{RegistryError, StrategyResolver, TemplateRouteRegistry};

/// Fatal startup failures.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("template route registration failed: {0}")]
    Registration(#[from] RegistryError),
}

/// Long-lived services shared by the server and the reload task.
#[derive(Debug, Clone)]
pub struct Services {
    pub registry: Arc<TemplateRouteRegistry>,
    pub patterns: Arc<ConfigPatternSource>,
}

/// Build services with the built-in strategies and register all templates.
pub fn bootstrap(config: &ThemeRouterConfig) -> Result<Services, StartupError> {
    bootstrap_with(config, StrategyResolver::builtin())
}

/// Like [`bootstrap`], with a caller-supplied strategy resolver.
pub fn bootstrap_with(config: &ThemeRouterConfig, strategies: StrategyResolver) -> Result<Services, StartupError> {
    let patterns = Arc::new(ConfigPatternSource::new(config.permalink.clone()));
    let registry = Arc::new(TemplateRouteRegistry::new(patterns.clone(), strategies));

    registry.initialize()?;
    tracing::info!(templates = registry.snapshot().len(), "Template routes ready");

    Ok(Services { registry, patterns })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateKind;

    #[test]
    fn test_bootstrap_registers_every_template() {
        let services = bootstrap(&ThemeRouterConfig::default()).unwrap();
        assert!(services.registry.is_initialized());
        assert_eq!(services.registry.snapshot().len(), TemplateKind::ALL.len());
    }

    #[test]
    fn test_bootstrap_fails_fast() {
        let mut config = ThemeRouterConfig::default();
        config.permalink.post = "no-leading-slash/{slug}".into();
        let err = bootstrap(&config).unwrap_err();
        assert!(matches!(
            err,
            StartupError::Registration(RegistryError::Strategy { ref template, .. }) if template == "post"
        ));
    }
}
