//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     Router::get / post / put / delete / route (pattern, handler)
//!     → pattern.rs (compile `:name` placeholders into an anchored matcher)
//!     Router::mount_static (prefix, directory)
//!     → route.rs (prefix matcher + ServeDir handler)
//!     → table.rs (append in registration order)
//!     → Router::handler() freezes the table
//!
//! Incoming Request (method, path)
//!     → service.rs (RouterService::call)
//!     → table.rs (dynamic routes first, then static mounts)
//!     → params.rs (captured values into request extensions)
//!     → handler
//! ```
//!
//! # Design Decisions
//! - Routes compiled at registration, immutable while serving
//! - First registered match wins
//! - No match is not an error: the host's default 404 applies

mod error;
pub mod params;
pub mod pattern;
pub mod route;
pub mod service;
pub mod table;

use std::path::Path;

use axum::handler::Handler;
use axum::http::Method;

pub use error::RouterError;
pub use params::{parameters, Parameters};
pub use pattern::PathPattern;
pub use route::{Route, RouteKind};
pub use service::RouterService;
pub use table::{RouteMatch, RouteTable};

/// Route registration builder.
///
/// Registration takes `&mut self`; [`Router::handler`] consumes the builder,
/// so no route can be added once serving has begun.
///
/// ```no_run
/// use param_router::routing::{Parameters, Router};
///
/// # fn build() -> Result<(), param_router::routing::RouterError> {
/// let mut router = Router::new();
/// router
///     .get("/namespaces/:namespace", |params: Parameters| async move {
///         params.get("namespace").unwrap_or_default().to_string()
///     })?
///     .mount_static("/static", "public")?;
/// let service = router.handler();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Router {
    table: RouteTable,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dynamic route for an arbitrary method.
    pub fn route<H, T>(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self, RouterError>
    where
        H: Handler<T, ()> + Sync,
        T: 'static,
    {
        self.table.register(method, pattern, handler)?;
        Ok(self)
    }

    pub fn get<H, T>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouterError>
    where
        H: Handler<T, ()> + Sync,
        T: 'static,
    {
        self.route(Method::GET, pattern, handler)
    }

    pub fn post<H, T>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouterError>
    where
        H: Handler<T, ()> + Sync,
        T: 'static,
    {
        self.route(Method::POST, pattern, handler)
    }

    pub fn put<H, T>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouterError>
    where
        H: Handler<T, ()> + Sync,
        T: 'static,
    {
        self.route(Method::PUT, pattern, handler)
    }

    pub fn delete<H, T>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouterError>
    where
        H: Handler<T, ()> + Sync,
        T: 'static,
    {
        self.route(Method::DELETE, pattern, handler)
    }

    /// Serve files from `directory` for every path under `mount_prefix`.
    pub fn mount_static(
        &mut self,
        mount_prefix: &str,
        directory: impl AsRef<Path>,
    ) -> Result<&mut Self, RouterError> {
        self.table.register_static(mount_prefix, directory)?;
        Ok(self)
    }

    /// Registered routes in registration order.
    pub fn routes(&self) -> &[Route] {
        self.table.routes()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Freeze the table and return the request-handling service.
    pub fn handler(self) -> RouterService {
        tracing::info!(routes = self.table.len(), "Route table frozen");
        RouterService::new(self.table)
    }

    /// Install the router as the fallback service of an axum router.
    pub fn into_axum(self) -> axum::Router {
        axum::Router::new().fallback_service(self.handler())
    }
}
