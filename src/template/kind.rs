//! Template kinds and their canonical identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A routable theme template.
///
/// Each variant owns exactly one canonical identifier, used as the key of
/// the route table and in every external surface (config, admin API).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Index,
    Post,
    Archives,
    Tags,
    Tag,
    Categories,
    Category,
    #[serde(rename = "page")]
    SinglePage,
}

/// Returned by [`TemplateKind::from_str`] for identifiers outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown template `{0}`")]
pub struct UnknownTemplate(pub String);

impl TemplateKind {
    /// Every kind, in registration order.
    pub const ALL: [TemplateKind; 8] = [
        TemplateKind::Index,
        TemplateKind::Post,
        TemplateKind::Archives,
        TemplateKind::Tags,
        TemplateKind::Tag,
        TemplateKind::Categories,
        TemplateKind::Category,
        TemplateKind::SinglePage,
    ];

    /// Iterate every kind in a fixed, deterministic order.
    pub fn all() -> impl Iterator<Item = TemplateKind> {
        Self::ALL.into_iter()
    }

    /// Canonical identifier of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            TemplateKind::Index => "index",
            TemplateKind::Post => "post",
            TemplateKind::Archives => "archives",
            TemplateKind::Tags => "tags",
            TemplateKind::Tag => "tag",
            TemplateKind::Categories => "categories",
            TemplateKind::Category => "category",
            TemplateKind::SinglePage => "page",
        }
    }

    /// Convert an identifier into its kind.
    ///
    /// Matching is exact and case-sensitive; anything else is `None`.
    pub fn convert_from(identifier: &str) -> Option<Self> {
        Self::all().find(|kind| kind.as_str() == identifier)
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::convert_from(s).ok_or_else(|| UnknownTemplate(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_every_kind() {
        for kind in TemplateKind::all() {
            assert_eq!(TemplateKind::convert_from(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_identifiers_are_unique() {
        let mut ids: Vec<_> = TemplateKind::all().map(TemplateKind::as_str).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), TemplateKind::ALL.len());
    }

    #[test]
    fn test_unknown_identifiers() {
        for id in ["", "Index", "POST", " post", "single_page", "not-a-real-template"] {
            assert_eq!(TemplateKind::convert_from(id), None, "{id:?} should not convert");
        }
        assert_eq!(
            "tagz".parse::<TemplateKind>(),
            Err(UnknownTemplate("tagz".to_string()))
        );
    }

    #[test]
    fn test_enumeration_order() {
        let order: Vec<_> = TemplateKind::all().map(|k| k.to_string()).collect();
        assert_eq!(
            order,
            ["index", "post", "archives", "tags", "tag", "categories", "category", "page"]
        );
    }

    #[test]
    fn test_serde_uses_identifier() {
        let json = serde_json::to_string(&TemplateKind::SinglePage).unwrap();
        assert_eq!(json, "\"page\"");
        let kind: TemplateKind = serde_json::from_str("\"categories\"").unwrap();
        assert_eq!(kind, TemplateKind::Categories);
    }
}
