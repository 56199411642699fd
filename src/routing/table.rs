//! Route storage and lookup.
//!
//! # Responsibilities
//! - Store compiled routes in registration order
//! - Resolve a (method, path) pair to a route and its parameters
//! - Return the matched route or an explicit no-match
//!
//! # Design Decisions
//! - Immutable once frozen behind an `Arc` (thread-safe without locks)
//! - O(n) ordered scan; the first registered matching route wins
//! - Dynamic routes are always tried before static mounts
//! - Duplicate registrations are kept; the earlier one shadows the later

use std::path::Path;

use axum::handler::Handler;
use axum::http::Method;

use crate::routing::pattern::PathPattern;
use crate::routing::route::{boxed_handler, Route, RouteKind};
use crate::routing::{Parameters, RouterError};

/// A resolved route together with the parameters it captured.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    /// `Some` for dynamic routes, `None` for static mounts.
    pub parameters: Option<Parameters>,
}

/// Ordered collection of registered routes.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `pattern` and append a dynamic route answering `method`.
    pub fn register<H, T>(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
    ) -> Result<&Route, RouterError>
    where
        H: Handler<T, ()> + Sync,
        T: 'static,
    {
        let compiled = PathPattern::compile(pattern)?;

        tracing::debug!(
            method = %method,
            pattern = %pattern,
            parameters = ?compiled.parameter_names(),
            segments = compiled.segment_count(),
            "Route registered"
        );

        Ok(self.push(Route::dynamic(method, compiled, boxed_handler(handler))))
    }

    /// Append a static route serving `base_dir` under `mount_prefix`.
    pub fn register_static(
        &mut self,
        mount_prefix: &str,
        base_dir: impl AsRef<Path>,
    ) -> Result<&Route, RouterError> {
        let base_dir = base_dir.as_ref();
        let route = Route::mount(mount_prefix, base_dir)?;

        tracing::debug!(
            mount_prefix = %mount_prefix,
            base_dir = %base_dir.display(),
            "Static route registered"
        );

        Ok(self.push(route))
    }

    fn push(&mut self, route: Route) -> &Route {
        self.routes.push(route);
        &self.routes[self.routes.len() - 1]
    }

    /// Find the route answering `method` and `path`.
    ///
    /// Dynamic routes are scanned first, in registration order, and must match
    /// both method and path. Static mounts are scanned next and match on the
    /// path prefix alone. Returns `None` when nothing matches.
    pub fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        let dynamic = self.routes.iter().filter(|r| !r.is_static());
        for route in dynamic {
            if route.method() != method {
                continue;
            }
            let RouteKind::Dynamic(pattern) = route.kind() else {
                continue;
            };
            if let Some(values) = pattern.captures(path) {
                return Some(RouteMatch {
                    route,
                    parameters: Some(Parameters::from_captures(
                        pattern.parameter_names(),
                        &values,
                    )),
                });
            }
        }

        self.routes
            .iter()
            .filter(|r| r.is_static())
            .find(|r| r.matches_path(path))
            .map(|route| RouteMatch {
                route,
                parameters: None,
            })
    }

    /// Registered routes in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
