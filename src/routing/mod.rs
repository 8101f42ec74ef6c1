//! Template routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route construction (startup, rule change):
//!     template identifier
//!     → TemplateKind::convert_from (closed set)
//!     → PatternSource (permalink pattern)
//!     → resolver.rs (kind → strategy)
//!     → strategy builds TemplateHandler (matcher.rs compiles routes)
//!     → registry.rs publishes it into the route table
//!
//! Incoming request:
//!     registry snapshot → table.rs dispatch(path)
//!     → Return: matched template + params, or NoMatch
//! ```
//!
//! # Design Decisions
//! - Handlers are immutable; a change publishes a new handler
//! - No regex in hot path (segment matching only)
//! - Deterministic: same input always matches same route
//! - Most specific route wins, ties broken by template order

pub mod handler;
pub mod matcher;
pub mod registry;
pub mod resolver;
pub mod strategies;
pub mod strategy;
pub mod table;

pub use handler::TemplateHandler;
pub use matcher::{PatternParseError, RoutePattern};
pub use registry::{RegistryError, TemplateRouteRegistry};
pub use resolver::StrategyResolver;
pub use strategy::{RouteStrategy, StrategyError};
pub use table::{Dispatch, RouteTable};
