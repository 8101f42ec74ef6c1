//! Built-in route strategies, one per template kind.
//!
//! Each strategy expands the permalink pattern it receives into the set of
//! routes the template answers:
//!
//! ```text
//! index       /            /page/{page:int}
//! post        {pattern}
//! archives    {prefix}     {prefix}/page/{page:int}
//!             {prefix}/{year:int}[/{month:int}][/page/{page:int}]
//! tags        {prefix}
//! tag         {prefix}/{slug}   {prefix}/{slug}/page/{page:int}
//! categories  {prefix}
//! category    {prefix}/{slug}   {prefix}/{slug}/page/{page:int}
//! page        {pattern}
//! ```

use crate::routing::handler::TemplateHandler;
use crate::routing::matcher::{join, RoutePattern};
use crate::routing::strategy::{RouteStrategy, StrategyError};

const PAGED: &str = "page/{page:int}";

/// Compile `prefix` joined with each suffix (an empty suffix is the prefix itself).
fn build(template: &str, prefix: &str, suffixes: &[&str]) -> Result<TemplateHandler, StrategyError> {
    let routes = suffixes
        .iter()
        .map(|suffix| RoutePattern::parse(&join(prefix, suffix)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TemplateHandler::new(template, prefix, routes))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IndexRouteStrategy;

impl RouteStrategy for IndexRouteStrategy {
    fn build_handler(&self, template: &str, pattern: &str) -> Result<TemplateHandler, StrategyError> {
        build(template, pattern, &["", PAGED])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PostRouteStrategy;

impl RouteStrategy for PostRouteStrategy {
    fn build_handler(&self, template: &str, pattern: &str) -> Result<TemplateHandler, StrategyError> {
        Ok(TemplateHandler::new(template, pattern, vec![RoutePattern::parse(pattern)?]))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ArchivesRouteStrategy;

impl RouteStrategy for ArchivesRouteStrategy {
    fn build_handler(&self, template: &str, pattern: &str) -> Result<TemplateHandler, StrategyError> {
        build(
            template,
            pattern,
            &[
                "",
                PAGED,
                "{year:int}",
                "{year:int}/page/{page:int}",
                "{year:int}/{month:int}",
                "{year:int}/{month:int}/page/{page:int}",
            ],
        )
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TagsRouteStrategy;

impl RouteStrategy for TagsRouteStrategy {
    fn build_handler(&self, template: &str, pattern: &str) -> Result<TemplateHandler, StrategyError> {
        build(template, pattern, &[""])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TagRouteStrategy;

impl RouteStrategy for TagRouteStrategy {
    fn build_handler(&self, template: &str, pattern: &str) -> Result<TemplateHandler, StrategyError> {
        build(template, pattern, &["{slug}", "{slug}/page/{page:int}"])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CategoriesRouteStrategy;

impl RouteStrategy for CategoriesRouteStrategy {
    fn build_handler(&self, template: &str, pattern: &str) -> Result<TemplateHandler, StrategyError> {
        build(template, pattern, &[""])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CategoryRouteStrategy;

impl RouteStrategy for CategoryRouteStrategy {
    fn build_handler(&self, template: &str, pattern: &str) -> Result<TemplateHandler, StrategyError> {
        build(template, pattern, &["{slug}", "{slug}/page/{page:int}"])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SinglePageRouteStrategy;

impl RouteStrategy for SinglePageRouteStrategy {
    fn build_handler(&self, template: &str, pattern: &str) -> Result<TemplateHandler, StrategyError> {
        Ok(TemplateHandler::new(template, pattern, vec![RoutePattern::parse(pattern)?]))
    }
}
