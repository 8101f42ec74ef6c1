//! Template handlers: the values published in the route table.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::routing::matcher::{Params, RoutePattern, Specificity};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// How to route requests for one template.
///
/// Immutable once built. Every handler gets a process-unique generation
/// number, so two builds for the same template are always distinguishable.
#[derive(Debug)]
pub struct TemplateHandler {
    template: String,
    pattern: String,
    generation: u64,
    routes: Vec<RoutePattern>,
}

/// A route of a handler that accepted a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'a RoutePattern,
    pub params: Params,
}

impl TemplateHandler {
    pub fn new(template: impl Into<String>, pattern: impl Into<String>, routes: Vec<RoutePattern>) -> Self {
        Self {
            template: template.into(),
            pattern: pattern.into(),
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
            routes,
        }
    }

    /// Identifier of the template this handler serves.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Permalink pattern the handler was built from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn routes(&self) -> &[RoutePattern] {
        &self.routes
    }

    /// A handler without routes cannot serve anything.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Most specific route accepting `path`; ties go to the earlier route.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_>> {
        let mut best: Option<(Specificity, RouteMatch<'_>)> = None;
        for route in &self.routes {
            let Some(params) = route.match_path(path) else {
                continue;
            };
            let spec = route.specificity();
            let better = match &best {
                Some((current, _)) => spec > *current,
                None => true,
            };
            if better {
                best = Some((spec, RouteMatch { route, params }));
            }
        }
        best.map(|(_, found)| found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes(patterns: &[&str]) -> Vec<RoutePattern> {
        patterns.iter().map(|p| RoutePattern::parse(p).unwrap()).collect()
    }

    #[test]
    fn test_generations_are_unique() {
        let a = TemplateHandler::new("post", "/archives/{slug}", routes(&["/archives/{slug}"]));
        let b = TemplateHandler::new("post", "/archives/{slug}", routes(&["/archives/{slug}"]));
        assert_ne!(a.generation(), b.generation());
    }

    #[test]
    fn test_match_prefers_specific_route() {
        let handler = TemplateHandler::new(
            "archives",
            "/archives",
            routes(&["/archives/{slug}", "/archives/{year:int}"]),
        );
        let found = handler.match_path("/archives/2024").unwrap();
        assert_eq!(found.route.as_str(), "/archives/{year:int}");
        assert_eq!(found.params.get("year").map(String::as_str), Some("2024"));

        let found = handler.match_path("/archives/notes").unwrap();
        assert_eq!(found.route.as_str(), "/archives/{slug}");
    }

    #[test]
    fn test_empty_handler() {
        let handler = TemplateHandler::new("tags", "/tags", Vec::new());
        assert!(handler.is_empty());
        assert!(handler.match_path("/tags").is_none());
    }
}
