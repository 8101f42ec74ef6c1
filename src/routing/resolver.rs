//! Template kind → route strategy selection.
//!
//! # Design Decisions
//! - One slot per kind, selected by an exhaustive `match`: a new kind
//!   without a strategy does not compile
//! - Built once at startup, immutable afterwards
//! - Any slot can be overridden through the builder (custom themes, tests)

use std::collections::HashMap;
use std::sync::Arc;

use crate::routing::strategies::{
    ArchivesRouteStrategy, CategoriesRouteStrategy, CategoryRouteStrategy, IndexRouteStrategy,
    PostRouteStrategy, SinglePageRouteStrategy, TagRouteStrategy, TagsRouteStrategy,
};
use crate::routing::strategy::RouteStrategy;
use crate::template::TemplateKind;

/// Maps every template kind to its route strategy.
#[derive(Debug, Clone)]
pub struct StrategyResolver {
    index: Arc<dyn RouteStrategy>,
    post: Arc<dyn RouteStrategy>,
    archives: Arc<dyn RouteStrategy>,
    tags: Arc<dyn RouteStrategy>,
    tag: Arc<dyn RouteStrategy>,
    categories: Arc<dyn RouteStrategy>,
    category: Arc<dyn RouteStrategy>,
    single_page: Arc<dyn RouteStrategy>,
}

impl StrategyResolver {
    /// Resolver wired with the built-in strategies.
    pub fn builtin() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> StrategyResolverBuilder {
        StrategyResolverBuilder::default()
    }

    /// Strategy for `kind`. Total over the closed set.
    pub fn resolve(&self, kind: TemplateKind) -> &Arc<dyn RouteStrategy> {
        match kind {
            TemplateKind::Index => &self.index,
            TemplateKind::Post => &self.post,
            TemplateKind::Archives => &self.archives,
            TemplateKind::Tags => &self.tags,
            TemplateKind::Tag => &self.tag,
            TemplateKind::Categories => &self.categories,
            TemplateKind::Category => &self.category,
            TemplateKind::SinglePage => &self.single_page,
        }
    }
}

impl Default for StrategyResolver {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Builder for [`StrategyResolver`]; unset kinds fall back to built-ins.
#[derive(Debug, Default)]
pub struct StrategyResolverBuilder {
    overrides: HashMap<TemplateKind, Arc<dyn RouteStrategy>>,
}

impl StrategyResolverBuilder {
    /// Use `strategy` for `kind` instead of the built-in one.
    pub fn strategy(mut self, kind: TemplateKind, strategy: Arc<dyn RouteStrategy>) -> Self {
        self.overrides.insert(kind, strategy);
        self
    }

    pub fn build(mut self) -> StrategyResolver {
        let mut slot = |kind: TemplateKind, builtin: Arc<dyn RouteStrategy>| {
            self.overrides.remove(&kind).unwrap_or(builtin)
        };
        StrategyResolver {
            index: slot(TemplateKind::Index, Arc::new(IndexRouteStrategy)),
            post: slot(TemplateKind::Post, Arc::new(PostRouteStrategy)),
            archives: slot(TemplateKind::Archives, Arc::new(ArchivesRouteStrategy)),
            tags: slot(TemplateKind::Tags, Arc::new(TagsRouteStrategy)),
            tag: slot(TemplateKind::Tag, Arc::new(TagRouteStrategy)),
            categories: slot(TemplateKind::Categories, Arc::new(CategoriesRouteStrategy)),
            category: slot(TemplateKind::Category, Arc::new(CategoryRouteStrategy)),
            single_page: slot(TemplateKind::SinglePage, Arc::new(SinglePageRouteStrategy)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::handler::TemplateHandler;
    use crate::routing::strategy::StrategyError;

    #[derive(Debug)]
    struct Marker;

    impl RouteStrategy for Marker {
        fn build_handler(&self, template: &str, pattern: &str) -> Result<TemplateHandler, StrategyError> {
            Ok(TemplateHandler::new(template, format!("marker:{pattern}"), Vec::new()))
        }
    }

    #[test]
    fn test_every_kind_resolves() {
        let resolver = StrategyResolver::builtin();
        for kind in TemplateKind::all() {
            let pattern = if kind == TemplateKind::Post || kind == TemplateKind::SinglePage {
                "/{slug}"
            } else {
                "/section"
            };
            let handler = resolver
                .resolve(kind)
                .build_handler(kind.as_str(), pattern)
                .unwrap_or_else(|e| panic!("{kind} failed to build: {e}"));
            assert!(!handler.is_empty(), "{kind} built an empty handler");
        }
    }

    #[test]
    fn test_override_single_slot() {
        let resolver = StrategyResolver::builder()
            .strategy(TemplateKind::Tag, Arc::new(Marker))
            .build();

        let tag = resolver.resolve(TemplateKind::Tag).build_handler("tag", "/tags").unwrap();
        assert_eq!(tag.pattern(), "marker:/tags");

        let tags = resolver.resolve(TemplateKind::Tags).build_handler("tags", "/tags").unwrap();
        assert_eq!(tags.pattern(), "/tags");
    }
}
