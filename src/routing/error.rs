//! Routing error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors raised by route registration and parameter access.
///
/// A request that matches no route is not an error; see
/// [`RouteTable::resolve`](crate::routing::RouteTable::resolve).
#[derive(Debug, Error)]
pub enum RouterError {
    /// A registered pattern or mount prefix cannot be compiled into a matcher.
    #[error("Invalid route pattern '{pattern}': {reason}")]
    PatternCompile { pattern: String, reason: String },

    /// Path parameters were requested outside a dynamic route match.
    #[error("Path parameters are not available for this request")]
    ParametersUnavailable,
}

impl RouterError {
    pub(crate) fn pattern(pattern: &str, reason: impl Into<String>) -> Self {
        RouterError::PatternCompile {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

impl IntoResponse for RouterError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Route handler misconfigured");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
