//! Route pattern compilation and path matching.
//!
//! # Responsibilities
//! - Compile permalink-style patterns (`/archives/{slug}`) into segments
//! - Match request paths segment by segment, capturing parameters
//! - Rank competing matches by specificity
//!
//! # Design Decisions
//! - Matching is case-sensitive (paths are case-sensitive)
//! - A trailing `/` on the request path is ignored
//! - `{name}` accepts any non-empty segment, `{name:int}` only ASCII digits
//! - No regex to guarantee O(n) matching

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use thiserror::Error;

/// Parameters captured by a successful match, keyed by name.
pub type Params = BTreeMap<String, String>;

/// Errors raised while compiling a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternParseError {
    #[error("pattern `{0}` must start with '/'")]
    MissingLeadingSlash(String),

    #[error("pattern `{0}` contains an empty segment")]
    EmptySegment(String),

    #[error("malformed segment `{segment}` in pattern `{pattern}`")]
    MalformedSegment { pattern: String, segment: String },

    #[error("parameter `{name}` appears more than once in pattern `{pattern}`")]
    DuplicateParam { pattern: String, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    IntParam(String),
}

impl Segment {
    fn parse(pattern: &str, raw: &str) -> Result<Self, PatternParseError> {
        let malformed = || PatternParseError::MalformedSegment {
            pattern: pattern.to_string(),
            segment: raw.to_string(),
        };

        let Some(inner) = raw.strip_prefix('{') else {
            if raw.contains(['{', '}']) {
                return Err(malformed());
            }
            return Ok(Segment::Literal(raw.to_string()));
        };
        let inner = inner.strip_suffix('}').ok_or_else(malformed)?;

        let (name, constraint) = match inner.split_once(':') {
            Some((name, constraint)) => (name, Some(constraint)),
            None => (inner, None),
        };
        let valid_name = !name.is_empty()
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_name {
            return Err(malformed());
        }

        match constraint {
            None => Ok(Segment::Param(name.to_string())),
            Some("int") => Ok(Segment::IntParam(name.to_string())),
            Some(_) => Err(malformed()),
        }
    }

    fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Literal(_) => None,
            Segment::Param(name) | Segment::IntParam(name) => Some(name),
        }
    }

    fn accepts(&self, part: &str) -> bool {
        match self {
            Segment::Literal(literal) => literal == part,
            Segment::Param(_) => !part.is_empty(),
            Segment::IntParam(_) => !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()),
        }
    }
}

/// Ranking of a match; larger is more specific.
///
/// Literal segments outrank constrained parameters, which outrank free ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    literals: usize,
    constrained: usize,
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Compile a pattern such as `/archives/{year:int}/page/{page:int}`.
    pub fn parse(pattern: &str) -> Result<Self, PatternParseError> {
        let rest = pattern
            .strip_prefix('/')
            .ok_or_else(|| PatternParseError::MissingLeadingSlash(pattern.to_string()))?;

        let mut segments = Vec::new();
        if !rest.is_empty() {
            for raw in rest.split('/') {
                if raw.is_empty() {
                    return Err(PatternParseError::EmptySegment(pattern.to_string()));
                }
                segments.push(Segment::parse(pattern, raw)?);
            }
        }

        let mut seen = HashSet::new();
        for name in segments.iter().filter_map(Segment::param_name) {
            if !seen.insert(name) {
                return Err(PatternParseError::DuplicateParam {
                    pattern: pattern.to_string(),
                    name: name.to_string(),
                });
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// The pattern text this route was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern captures any parameter.
    pub fn has_params(&self) -> bool {
        self.segments.iter().any(|s| s.param_name().is_some())
    }

    pub fn specificity(&self) -> Specificity {
        let mut spec = Specificity {
            literals: 0,
            constrained: 0,
        };
        for segment in &self.segments {
            match segment {
                Segment::Literal(_) => spec.literals += 1,
                Segment::IntParam(_) => spec.constrained += 1,
                Segment::Param(_) => {}
            }
        }
        spec
    }

    /// Match a request path, returning the captured parameters.
    pub fn match_path(&self, path: &str) -> Option<Params> {
        let rest = path.strip_prefix('/')?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let parts: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            if !segment.accepts(part) {
                return None;
            }
            if let Some(name) = segment.param_name() {
                params.insert(name.to_string(), part.to_string());
            }
        }
        Some(params)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Append `suffix` to a prefix pattern with exactly one `/` between them.
pub fn join(prefix: &str, suffix: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let suffix = suffix.trim_start_matches('/');
    if suffix.is_empty() {
        return if prefix.is_empty() { "/".to_string() } else { prefix.to_string() };
    }
    format!("{prefix}/{suffix}")
}
