//! HTTP request router with named path parameters and static file mounts.

pub mod config;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use http::HttpServer;
pub use routing::{parameters, Parameters, Router, RouterError, RouterService};
