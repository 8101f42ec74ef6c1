//! Template route registry.
//!
//! # Responsibilities
//! - Build one handler per template kind at startup
//! - Rebuild and replace a single template's handler on demand
//! - Hand out immutable snapshots to the serving path
//!
//! # Design Decisions
//! - Readers never lock: the table is an `ArcSwap`, each write publishes a
//!   fresh copy in one atomic store
//! - Writers serialize on one mutex held only for copy + store; pattern
//!   lookup and handler construction happen before it is taken
//! - A failed build leaves the published table untouched
//! - Empty handlers are rejected on every write path

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use thiserror::Error;

use crate::observability::metrics;
use crate::permalink::{PatternError, PatternSource};
use crate::routing::handler::TemplateHandler;
use crate::routing::resolver::StrategyResolver;
use crate::routing::strategy::{RouteStrategy, StrategyError};
use crate::routing::table::{Entries, RouteTable};
use crate::template::TemplateKind;

/// Errors surfaced by registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The identifier is not one of the known templates.
    #[error("template name `{0}` is not valid")]
    InvalidTemplateName(String),

    /// No strategy is registered for the template.
    #[error("unknown template: {0}")]
    TemplateNotFound(String),

    /// The strategy produced a handler without routes.
    #[error("route handler for template `{0}` must not be empty")]
    HandlerConstructionFailed(String),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("failed to build routes for template `{template}`: {source}")]
    Strategy {
        template: String,
        source: StrategyError,
    },

    #[error("template routes are already initialized")]
    AlreadyInitialized,
}

/// Process-wide table of template routes.
pub struct TemplateRouteRegistry {
    table: ArcSwap<Entries>,
    write_lock: Mutex<()>,
    initialized: AtomicBool,
    patterns: Arc<dyn PatternSource>,
    strategies: StrategyResolver,
}

impl TemplateRouteRegistry {
    /// Create an empty registry. Call [`initialize`](Self::initialize) once
    /// before serving traffic.
    pub fn new(patterns: Arc<dyn PatternSource>, strategies: StrategyResolver) -> Self {
        Self {
            table: ArcSwap::from_pointee(Entries::new()),
            write_lock: Mutex::new(()),
            initialized: AtomicBool::new(false),
            patterns,
            strategies,
        }
    }

    /// Immutable copy of the current table. Never blocks.
    pub fn snapshot(&self) -> RouteTable {
        RouteTable::from_entries(self.table.load_full())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Register every template kind. Succeeds at most once per registry.
    ///
    /// The first failure aborts the pass and is returned; the registry
    /// stays marked as initialized so a half-built table is never retried.
    pub fn initialize(&self) -> Result<(), RegistryError> {
        if self.initialized.swap(true, Ordering::AcqRel) {
            return Err(RegistryError::AlreadyInitialized);
        }
        self.register_all()
    }

    fn register_all(&self) -> Result<(), RegistryError> {
        for kind in TemplateKind::all() {
            self.register(kind.as_str())?;
        }
        tracing::info!(templates = self.table.load().len(), "Template routes registered");
        Ok(())
    }

    /// Build and insert the handler for `template`.
    pub fn register(&self, template: &str) -> Result<(), RegistryError> {
        let handler = self.build(template)?;
        tracing::debug!(
            template,
            pattern = handler.pattern(),
            generation = handler.generation(),
            "Registering template routes"
        );
        self.publish(template, handler);
        Ok(())
    }

    /// Rebuild the handler for `template` and replace its entry.
    ///
    /// On error the previous entry stays published.
    pub fn change_template_pattern(&self, template: &str) -> Result<Arc<TemplateHandler>, RegistryError> {
        let handler = self.build(template)?;
        let previous = self.publish(template, Arc::clone(&handler));
        tracing::info!(
            template,
            pattern = handler.pattern(),
            generation = handler.generation(),
            previous_generation = previous.as_ref().map(|h| h.generation()),
            "Template routes replaced"
        );
        Ok(handler)
    }

    fn build(&self, template: &str) -> Result<Arc<TemplateHandler>, RegistryError> {
        let result = self.try_build(template);
        let outcome = match &result {
            Ok(_) => "ok",
            Err(_) => "error",
        };
        metrics::record_route_build(template, outcome);
        if let Err(e) = &result {
            tracing::warn!(template, error = %e, "Failed to build template routes");
        }
        result
    }

    fn try_build(&self, template: &str) -> Result<Arc<TemplateHandler>, RegistryError> {
        let pattern = self.pattern_for(template)?;
        let handler = self
            .strategy_for(template)?
            .build_handler(template, &pattern)
            .map_err(|source| RegistryError::Strategy {
                template: template.to_string(),
                source,
            })?;
        if handler.is_empty() {
            return Err(RegistryError::HandlerConstructionFailed(template.to_string()));
        }
        Ok(Arc::new(handler))
    }

    fn pattern_for(&self, template: &str) -> Result<String, RegistryError> {
        let kind = TemplateKind::convert_from(template)
            .ok_or_else(|| RegistryError::InvalidTemplateName(template.to_string()))?;
        Ok(self.patterns.pattern(kind)?)
    }

    fn strategy_for(&self, template: &str) -> Result<&Arc<dyn RouteStrategy>, RegistryError> {
        let kind = TemplateKind::convert_from(template)
            .ok_or_else(|| RegistryError::TemplateNotFound(template.to_string()))?;
        Ok(self.strategies.resolve(kind))
    }

    /// Copy the table, put `handler` under `template`, publish the copy.
    fn publish(&self, template: &str, handler: Arc<TemplateHandler>) -> Option<Arc<TemplateHandler>> {
        // The lock guards no data, so a poisoned lock is safe to reuse.
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut next = Entries::clone(&self.table.load());
        let previous = next.insert(template.to_string(), handler);
        let size = next.len();
        self.table.store(Arc::new(next));

        metrics::record_table_size(size);
        previous
    }
}

impl std::fmt::Debug for TemplateRouteRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRouteRegistry")
            .field("templates", &self.table.load().len())
            .field("initialized", &self.is_initialized())
            .field("strategies", &self.strategies)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permalink::ConfigPatternSource;
    use crate::routing::matcher::PatternParseError;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;

    /// Pattern source with a fixed map; kinds not in the map are missing.
    struct MapSource(HashMap<TemplateKind, &'static str>);

    impl PatternSource for MapSource {
        fn pattern(&self, kind: TemplateKind) -> Result<String, PatternError> {
            self.0
                .get(&kind)
                .map(|p| p.to_string())
                .ok_or(PatternError::Missing(kind))
        }
    }

    #[derive(Debug, Default)]
    struct EmptyStrategy {
        calls: AtomicUsize,
    }

    impl RouteStrategy for EmptyStrategy {
        fn build_handler(&self, template: &str, pattern: &str) -> Result<TemplateHandler, StrategyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(TemplateHandler::new(template, pattern, Vec::new()))
        }
    }

    fn default_registry() -> TemplateRouteRegistry {
        TemplateRouteRegistry::new(Arc::new(ConfigPatternSource::default()), StrategyResolver::builtin())
    }

    #[test]
    fn test_starts_empty() {
        let registry = default_registry();
        assert!(registry.snapshot().is_empty());
        assert!(!registry.is_initialized());
    }

    #[test]
    fn test_initialize_registers_every_kind() {
        let registry = default_registry();
        registry.initialize().unwrap();

        let table = registry.snapshot();
        assert_eq!(table.len(), TemplateKind::ALL.len());
        for kind in TemplateKind::all() {
            let handler = table.get(kind.as_str()).unwrap();
            assert_eq!(handler.template(), kind.as_str());
        }
    }

    #[test]
    fn test_initialize_only_once() {
        let registry = default_registry();
        registry.initialize().unwrap();
        let before = registry.snapshot();

        assert_eq!(registry.initialize(), Err(RegistryError::AlreadyInitialized));
        assert!(registry.snapshot().same_table(&before));
    }

    #[test]
    fn test_index_and_post_patterns() {
        let mut patterns = HashMap::new();
        for kind in TemplateKind::all() {
            patterns.insert(kind, "/section");
        }
        patterns.insert(TemplateKind::Index, "/");
        patterns.insert(TemplateKind::Post, "/archives/{slug}");
        patterns.insert(TemplateKind::SinglePage, "/{slug}");
        let registry = TemplateRouteRegistry::new(Arc::new(MapSource(patterns)), StrategyResolver::builtin());
        registry.initialize().unwrap();

        let table = registry.snapshot();
        assert_eq!(table.get("index").unwrap().pattern(), "/");
        assert_eq!(table.get("post").unwrap().pattern(), "/archives/{slug}");
    }

    #[test]
    fn test_change_replaces_only_target() {
        let registry = default_registry();
        registry.initialize().unwrap();
        let before = registry.snapshot();

        let handler = registry.change_template_pattern("post").unwrap();
        let after = registry.snapshot();

        let old_post = before.get("post").unwrap();
        let new_post = after.get("post").unwrap();
        assert!(!Arc::ptr_eq(old_post, new_post));
        assert!(Arc::ptr_eq(new_post, &handler));
        assert_ne!(old_post.generation(), new_post.generation());

        for kind in TemplateKind::all().filter(|k| *k != TemplateKind::Post) {
            assert!(Arc::ptr_eq(
                before.get(kind.as_str()).unwrap(),
                after.get(kind.as_str()).unwrap()
            ));
        }
        // The earlier snapshot is unaffected by the write.
        assert!(Arc::ptr_eq(before.get("post").unwrap(), old_post));
    }

    #[test]
    fn test_change_unknown_template() {
        let registry = default_registry();
        registry.initialize().unwrap();
        let before = registry.snapshot();

        let err = registry.change_template_pattern("not-a-real-template").unwrap_err();
        assert_eq!(err, RegistryError::InvalidTemplateName("not-a-real-template".into()));
        assert!(registry.snapshot().same_table(&before));
    }

    #[test]
    fn test_empty_handler_rejected_on_both_paths() {
        let empty = Arc::new(EmptyStrategy::default());
        let resolver = StrategyResolver::builder()
            .strategy(TemplateKind::Tags, empty.clone())
            .build();
        let registry = TemplateRouteRegistry::new(Arc::new(ConfigPatternSource::default()), resolver);

        assert_eq!(
            registry.register("tags"),
            Err(RegistryError::HandlerConstructionFailed("tags".into()))
        );
        assert_eq!(
            registry.change_template_pattern("tags").unwrap_err(),
            RegistryError::HandlerConstructionFailed("tags".into())
        );
        assert!(!registry.snapshot().contains("tags"));
        assert_eq!(empty.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_initialize_aborts_on_first_failure() {
        let empty = Arc::new(EmptyStrategy::default());
        let resolver = StrategyResolver::builder()
            .strategy(TemplateKind::Tags, empty)
            .build();
        let registry = TemplateRouteRegistry::new(Arc::new(ConfigPatternSource::default()), resolver);

        assert_eq!(
            registry.initialize(),
            Err(RegistryError::HandlerConstructionFailed("tags".into()))
        );
        // Kinds before `tags` in enumeration order were registered, none after.
        let table = registry.snapshot();
        assert!(table.contains("index") && table.contains("post") && table.contains("archives"));
        assert!(!table.contains("tag") && !table.contains("page"));
    }

    #[test]
    fn test_pattern_errors_propagate() {
        let registry = TemplateRouteRegistry::new(Arc::new(MapSource(HashMap::new())), StrategyResolver::builtin());
        assert_eq!(
            registry.initialize(),
            Err(RegistryError::Pattern(PatternError::Missing(TemplateKind::Index)))
        );
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn test_strategy_errors_keep_previous_entry() {
        let source = Arc::new(ConfigPatternSource::default());
        let registry = TemplateRouteRegistry::new(source.clone(), StrategyResolver::builtin());
        registry.initialize().unwrap();
        let before = registry.snapshot();

        let mut rules = (*source.rules()).clone();
        rules.post = "archives/{slug}".into();
        source.replace(rules);

        let err = registry.change_template_pattern("post").unwrap_err();
        assert_eq!(
            err,
            RegistryError::Strategy {
                template: "post".into(),
                source: StrategyError::InvalidPattern(PatternParseError::MissingLeadingSlash(
                    "archives/{slug}".into()
                )),
            }
        );
        assert!(Arc::ptr_eq(
            before.get("post").unwrap(),
            registry.snapshot().get("post").unwrap()
        ));
    }
}
