//! Registered routes and their handlers.
//!
//! # Responsibilities
//! - Bind a compiled matcher and a method to a type-erased handler
//! - Synthesize the handler for static mounts (prefix strip + `ServeDir`)
//! - Evaluate the per-kind match predicate
//!
//! # Design Decisions
//! - Handlers are any axum `Handler<T, ()>`, boxed behind an `Arc` so the
//!   frozen table is `Send + Sync`
//! - Static routes match on prefix only; depth is unchecked

use std::convert::Infallible;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::handler::Handler;
use axum::http::uri::PathAndQuery;
use axum::http::{header, HeaderValue, Method, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use futures_util::future::{BoxFuture, FutureExt};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::routing::pattern::PathPattern;
use crate::routing::RouterError;

/// Type-erased async request handler.
pub(crate) type BoxedHandler =
    Arc<dyn Fn(Request<Body>) -> BoxFuture<'static, Response> + Send + Sync>;

pub(crate) fn boxed_handler<H, T>(handler: H) -> BoxedHandler
where
    H: Handler<T, ()> + Sync,
    T: 'static,
{
    Arc::new(move |req: Request<Body>| handler.clone().call(req, ()).boxed())
}

/// What a route matches on.
#[derive(Debug)]
pub enum RouteKind {
    /// A parameterized pattern, matched by segment count and full regex match.
    Dynamic(PathPattern),
    /// A directory mounted under a path prefix.
    Static {
        mount_prefix: String,
        base_dir: PathBuf,
    },
}

/// A single registered endpoint.
pub struct Route {
    method: Method,
    kind: RouteKind,
    handler: BoxedHandler,
}

impl Route {
    pub(crate) fn dynamic(method: Method, pattern: PathPattern, handler: BoxedHandler) -> Self {
        Self {
            method,
            kind: RouteKind::Dynamic(pattern),
            handler,
        }
    }

    pub(crate) fn mount(mount_prefix: &str, base_dir: &Path) -> Result<Self, RouterError> {
        if !mount_prefix.starts_with('/') {
            return Err(RouterError::pattern(
                mount_prefix,
                "mount prefix must start with '/'",
            ));
        }

        let serve_dir = ServeDir::new(base_dir);
        let prefix = mount_prefix.to_string();
        let handler: BoxedHandler = Arc::new(move |req: Request<Body>| {
            let serve_dir = serve_dir.clone();
            let prefix = prefix.clone();
            async move {
                let (mut parts, body) = req.into_parts();
                parts.uri = match strip_mount_prefix(&parts.uri, &prefix) {
                    Some(uri) => uri,
                    None => return StatusCode::BAD_REQUEST.into_response(),
                };
                let result: Result<_, Infallible> =
                    serve_dir.oneshot(Request::from_parts(parts, body)).await;
                match result {
                    Ok(response) => remount_location(response.map(Body::new), &prefix),
                    Err(never) => match never {},
                }
            }
            .boxed()
        });

        Ok(Self {
            method: Method::GET,
            kind: RouteKind::Static {
                mount_prefix: mount_prefix.to_string(),
                base_dir: base_dir.to_path_buf(),
            },
            handler,
        })
    }

    /// The registration pattern, or the mount prefix for a static route.
    pub fn path(&self) -> &str {
        match &self.kind {
            RouteKind::Dynamic(pattern) => pattern.as_str(),
            RouteKind::Static { mount_prefix, .. } => mount_prefix.as_str(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn kind(&self) -> &RouteKind {
        &self.kind
    }

    /// Parameter names in pattern order; empty for static routes.
    pub fn parameter_names(&self) -> &[String] {
        match &self.kind {
            RouteKind::Dynamic(pattern) => pattern.parameter_names(),
            RouteKind::Static { .. } => &[],
        }
    }

    pub fn segment_count(&self) -> usize {
        match &self.kind {
            RouteKind::Dynamic(pattern) => pattern.segment_count(),
            RouteKind::Static { mount_prefix, .. } => {
                crate::routing::pattern::segment_count(mount_prefix)
            }
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self.kind, RouteKind::Static { .. })
    }

    /// Returns true if `path` satisfies this route's match predicate.
    ///
    /// The method is not consulted here; the dispatcher compares it separately.
    pub fn matches_path(&self, path: &str) -> bool {
        match &self.kind {
            RouteKind::Dynamic(pattern) => pattern.matches(path),
            RouteKind::Static { mount_prefix, .. } => path.starts_with(mount_prefix.as_str()),
        }
    }

    pub(crate) fn handler(&self) -> &BoxedHandler {
        &self.handler
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Rebuild `uri` with `prefix` removed from the front of its path.
///
/// The remainder always starts with `/` and keeps the query string.
fn strip_mount_prefix(uri: &Uri, prefix: &str) -> Option<Uri> {
    let rest = uri.path().strip_prefix(prefix)?;
    let mut path = if rest.starts_with('/') {
        rest.to_string()
    } else {
        format!("/{}", rest)
    };
    if let Some(query) = uri.query() {
        path.push('?');
        path.push_str(query);
    }

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path).ok()?);
    Uri::from_parts(parts).ok()
}

/// Put `prefix` back in front of an absolute redirect issued by `ServeDir`.
///
/// `ServeDir` only sees the stripped path, so its directory-slash redirect
/// would otherwise point outside the mount.
fn remount_location(mut response: Response, prefix: &str) -> Response {
    if !response.status().is_redirection() {
        return response;
    }
    let Some(location) = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| v.starts_with('/'))
    else {
        return response;
    };

    let remounted = format!("{}{}", prefix.trim_end_matches('/'), location);
    match HeaderValue::try_from(remounted) {
        Ok(value) => {
            response.headers_mut().insert(header::LOCATION, value);
        }
        Err(e) => tracing::warn!(error = %e, "Cannot rewrite static redirect location"),
    }
    response
}
