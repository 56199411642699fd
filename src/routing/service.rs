//! Request dispatch.
//!
//! [`RouterService`] is the single entry point handed to the host server.
//! For every request it resolves a route against the frozen table, attaches
//! the captured [`Parameters`](crate::routing::Parameters) to the request
//! extensions and invokes the route's handler.

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::future::{BoxFuture, FutureExt};
use tower::Service;

use crate::observability::metrics;
use crate::routing::RouteTable;

/// Tower service dispatching requests through an immutable route table.
///
/// Cloning is cheap; all clones share the same table.
#[derive(Debug, Clone)]
pub struct RouterService {
    table: Arc<RouteTable>,
}

impl RouterService {
    pub(crate) fn new(table: RouteTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// The table this service dispatches against.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Resolve `req` and run the selected handler.
    ///
    /// Requests matching no route get an empty `404 Not Found`.
    pub async fn dispatch(&self, mut req: Request<Body>) -> Response {
        let method = req.method().clone();
        let path = req.uri().path().to_owned();

        let Some(matched) = self.table.resolve(&method, &path) else {
            tracing::debug!(method = %method, path = %path, "No route matched");
            metrics::record_dispatch(metrics::Outcome::NoMatch);
            return StatusCode::NOT_FOUND.into_response();
        };

        tracing::debug!(
            method = %method,
            path = %path,
            route = %matched.route.path(),
            "Route matched"
        );

        match matched.parameters {
            Some(parameters) => {
                metrics::record_dispatch(metrics::Outcome::Dynamic);
                req.extensions_mut().insert(parameters);
            }
            None => metrics::record_dispatch(metrics::Outcome::Static),
        }

        let handler = matched.route.handler().clone();
        handler(req).await
    }
}

impl Service<Request<Body>> for RouterService {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let this = self.clone();
        async move { Ok(this.dispatch(req).await) }.boxed()
    }
}
