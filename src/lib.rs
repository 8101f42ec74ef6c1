//! Theme template route registry and server library.

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod permalink;
pub mod routing;
pub mod template;

pub use config::ThemeRouterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{RegistryError, RouteTable, TemplateHandler, TemplateRouteRegistry};
pub use template::TemplateKind;
