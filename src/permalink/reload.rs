//! Applying permalink rule changes to the route registry.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{broadcast, mpsc};

use crate::config::validation::{validate_permalink, ValidationError};
use crate::config::{PermalinkConfig, ThemeRouterConfig};
use crate::permalink::ConfigPatternSource;
use crate::routing::{RegistryError, TemplateHandler, TemplateRouteRegistry};

/// Errors raised while applying new permalink rules.
#[derive(Debug, Error)]
pub enum ReloadError {
    #[error("permalink rules rejected: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate and install `rules`, then rebuild every template whose rule changed.
///
/// Invalid rules are rejected before anything is swapped. Returns the
/// rebuilt handlers in template order; unchanged rules rebuild nothing.
pub fn apply_rules(
    source: &ConfigPatternSource,
    registry: &TemplateRouteRegistry,
    rules: PermalinkConfig,
) -> Result<Vec<Arc<TemplateHandler>>, ReloadError> {
    validate_permalink(&rules).map_err(ReloadError::Invalid)?;

    let changed = source.rules().changed_kinds(&rules);
    if changed.is_empty() {
        tracing::debug!("Permalink rules unchanged");
        return Ok(Vec::new());
    }
    source.replace(rules);

    let mut rebuilt = Vec::with_capacity(changed.len());
    for kind in changed {
        rebuilt.push(registry.change_template_pattern(kind.as_str())?);
    }
    tracing::info!(rebuilt = rebuilt.len(), "Permalink rules applied");
    Ok(rebuilt)
}

/// Apply reloaded configurations until shutdown.
pub async fn run_reload_loop(
    source: Arc<ConfigPatternSource>,
    registry: Arc<TemplateRouteRegistry>,
    mut updates: mpsc::UnboundedReceiver<ThemeRouterConfig>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(config) = update else {
                    tracing::debug!("Config update channel closed");
                    return;
                };
                if let Err(e) = apply_rules(&source, &registry, config.permalink) {
                    tracing::error!(error = %e, "Failed to apply reloaded permalink rules");
                }
            }
            _ = shutdown.recv() => {
                tracing::info!("Reload loop received shutdown signal, exiting");
                return;
            }
        }
    }
}
