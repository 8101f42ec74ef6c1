//! Theme template catalogue.
//!
//! # Design Decisions
//! - The set of routable templates is closed and known at compile time
//! - Identifiers are the registry keys; conversion never guesses

pub mod kind;

pub use kind::{TemplateKind, UnknownTemplate};
