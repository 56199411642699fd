//! Request-scoped path parameters.
//!
//! The dispatcher inserts a [`Parameters`] value into the request extensions
//! before invoking the handler of a dynamic route. Handlers read it back with
//! [`parameters`] or by taking `Parameters` as an extractor, so their calling
//! convention is the same as for a handler without parameters.

use std::collections::HashMap;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::Request;
use serde::Serialize;

use crate::routing::RouterError;

/// Parameter values captured by a dynamic route, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Parameters {
    values: HashMap<String, String>,
}

impl Parameters {
    /// Zip parameter names with captured values, both in pattern order.
    pub(crate) fn from_captures(names: &[String], values: &[&str]) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self {
            values: names
                .iter()
                .zip(values)
                .map(|(name, value)| (name.clone(), value.to_string()))
                .collect(),
        }
    }

    /// Get the value captured for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Get the parameters attached to `req` by a dynamic route match.
///
/// Fails with [`RouterError::ParametersUnavailable`] when the request was not
/// dispatched through a dynamic route, e.g. inside a static handler.
pub fn parameters<B>(req: &Request<B>) -> Result<&Parameters, RouterError> {
    req.extensions()
        .get::<Parameters>()
        .ok_or(RouterError::ParametersUnavailable)
}

impl<S> FromRequestParts<S> for Parameters
where
    S: Send + Sync,
{
    type Rejection = RouterError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Parameters>()
            .cloned()
            .ok_or(RouterError::ParametersUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn deployment_parameters() -> Parameters {
        let names = vec!["namespace".to_string(), "deployment".to_string()];
        Parameters::from_captures(&names, &["bookinfo", "ratings"])
    }

    #[test]
    fn test_from_captures_zips_in_order() {
        let params = deployment_parameters();

        assert_eq!(params.len(), 2);
        assert!(!params.is_empty());
        assert!(Parameters::default().is_empty());
        assert_eq!(params.get("namespace"), Some("bookinfo"));
        assert_eq!(params.get("deployment"), Some("ratings"));
        assert_eq!(params.get("pod"), None);
    }

    #[test]
    fn test_iter_yields_every_pair() {
        let params = deployment_parameters();
        let mut pairs: Vec<(&str, &str)> = params.iter().collect();
        pairs.sort();
        assert_eq!(pairs, [("deployment", "ratings"), ("namespace", "bookinfo")]);
    }

    #[test]
    fn test_accessor_reads_extensions() {
        let mut req = Request::builder().uri("/").body(Body::empty()).unwrap();
        req.extensions_mut().insert(deployment_parameters());

        let params = parameters(&req).unwrap();
        assert_eq!(params.get("namespace"), Some("bookinfo"));
    }

    #[test]
    fn test_accessor_fails_without_match() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();

        assert!(matches!(
            parameters(&req),
            Err(RouterError::ParametersUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_extractor_rejects_without_match() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (mut parts, _) = req.into_parts();

        let result = Parameters::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(RouterError::ParametersUnavailable)));
    }

    #[test]
    fn test_serializes_as_map() {
        let json = serde_json::to_value(deployment_parameters()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "namespace": "bookinfo", "deployment": "ratings" })
        );
    }
}
