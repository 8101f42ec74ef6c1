//! Immutable route table snapshots.

use std::collections::HashMap;
use std::sync::Arc;

use crate::routing::handler::TemplateHandler;
use crate::routing::matcher::{Params, Specificity};
use crate::template::TemplateKind;

pub(crate) type Entries = HashMap<String, Arc<TemplateHandler>>;

/// Point-in-time view of the template → handler table.
///
/// Cloning is cheap; the contents never change after the snapshot is taken.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Arc<Entries>,
}

/// Outcome of dispatching a request path through a table.
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub handler: Arc<TemplateHandler>,
    /// Pattern of the route that matched.
    pub route: String,
    pub params: Params,
}

impl RouteTable {
    pub(crate) fn from_entries(entries: Arc<Entries>) -> Self {
        Self { entries }
    }

    pub fn get(&self, template: &str) -> Option<&Arc<TemplateHandler>> {
        self.entries.get(template)
    }

    pub fn contains(&self, template: &str) -> bool {
        self.entries.contains_key(template)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in template enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (TemplateKind, &Arc<TemplateHandler>)> {
        TemplateKind::all().filter_map(|kind| self.entries.get(kind.as_str()).map(|h| (kind, h)))
    }

    /// Whether both snapshots were taken from the same published table.
    pub fn same_table(&self, other: &RouteTable) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    /// Find the handler that serves `path`.
    ///
    /// The most specific matching route wins; ties go to the template that
    /// comes first in enumeration order.
    pub fn dispatch(&self, path: &str) -> Option<Dispatch> {
        let mut best: Option<(Specificity, Dispatch)> = None;
        for (_, handler) in self.iter() {
            let Some(found) = handler.match_path(path) else {
                continue;
            };
            let spec = found.route.specificity();
            let better = match &best {
                Some((current, _)) => spec > *current,
                None => true,
            };
            if better {
                let dispatch = Dispatch {
                    handler: Arc::clone(handler),
                    route: found.route.as_str().to_string(),
                    params: found.params,
                };
                best = Some((spec, dispatch));
            }
        }
        best.map(|(_, dispatch)| dispatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PermalinkConfig;
    use crate::routing::resolver::StrategyResolver;

    fn default_table() -> RouteTable {
        let rules = PermalinkConfig::default();
        let resolver = StrategyResolver::builtin();
        let entries = TemplateKind::all()
            .map(|kind| {
                let handler = resolver
                    .resolve(kind)
                    .build_handler(kind.as_str(), rules.rule(kind))
                    .unwrap();
                (kind.as_str().to_string(), Arc::new(handler))
            })
            .collect();
        RouteTable::from_entries(Arc::new(entries))
    }

    fn dispatched(table: &RouteTable, path: &str) -> Option<String> {
        table.dispatch(path).map(|d| d.handler.template().to_string())
    }

    #[test]
    fn test_dispatch_default_site() {
        let table = default_table();
        assert_eq!(dispatched(&table, "/").as_deref(), Some("index"));
        assert_eq!(dispatched(&table, "/page/2").as_deref(), Some("index"));
        assert_eq!(dispatched(&table, "/archives").as_deref(), Some("archives"));
        assert_eq!(dispatched(&table, "/archives/2024").as_deref(), Some("archives"));
        assert_eq!(dispatched(&table, "/archives/hello-world").as_deref(), Some("post"));
        assert_eq!(dispatched(&table, "/tags").as_deref(), Some("tags"));
        assert_eq!(dispatched(&table, "/tags/rust").as_deref(), Some("tag"));
        assert_eq!(dispatched(&table, "/categories").as_deref(), Some("categories"));
        assert_eq!(dispatched(&table, "/categories/notes/page/2").as_deref(), Some("category"));
        assert_eq!(dispatched(&table, "/about").as_deref(), Some("page"));
        assert_eq!(dispatched(&table, "/a/b/c/d/e"), None);
    }

    #[test]
    fn test_dispatch_reports_params() {
        let table = default_table();
        let found = table.dispatch("/archives/2024/05/page/3").unwrap();
        assert_eq!(found.route, "/archives/{year:int}/{month:int}/page/{page:int}");
        assert_eq!(found.params.len(), 3);
    }

    #[test]
    fn test_iter_in_enumeration_order() {
        let table = default_table();
        let kinds: Vec<_> = table.iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, TemplateKind::ALL);
        assert!(table.same_table(&table.clone()));
        assert!(!table.same_table(&RouteTable::default()));
    }
}
