//! Path pattern compilation and matching.
//!
//! # Responsibilities
//! - Parse `:name` placeholders out of a registration pattern
//! - Compile the pattern into an anchored regex with one capture per parameter
//! - Match concrete paths and extract captured values in pattern order
//!
//! # Design Decisions
//! - Parameter values are restricted to `[a-z]+` (lowercase ASCII letters).
//!   Digits, hyphens and uppercase never match a placeholder.
//! - Literal segments are escaped, so they always match literally
//! - Segment count is compared before running the regex
//! - Malformed patterns are rejected at compile time, never stored
//! - A parameter name may appear only once per pattern; `/a/:x/b/:x` is
//!   rejected rather than letting the later capture overwrite the earlier one

use regex::Regex;

use crate::routing::RouterError;

/// Capture group substituted for every `:name` placeholder.
const PARAMETER_CAPTURE: &str = "([a-z]+)";

/// Count the `/`-delimited segments of an absolute path.
///
/// The leading empty segment produced by the initial `/` is not counted,
/// so `/a/b` has two segments and `/a/b/` has three.
pub fn segment_count(path: &str) -> usize {
    path.split('/').count().saturating_sub(1)
}

/// A compiled path pattern such as `/namespaces/:namespace/deployments/:deployment`.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    parameter_names: Vec<String>,
    segment_count: usize,
    regex: Regex,
}

impl PathPattern {
    /// Compile a registration pattern.
    pub fn compile(pattern: impl Into<String>) -> Result<Self, RouterError> {
        let source = pattern.into();

        if !source.starts_with('/') {
            return Err(RouterError::pattern(&source, "pattern must start with '/'"));
        }

        let mut parameter_names: Vec<String> = Vec::new();
        let mut expression = String::from("^");

        for (i, segment) in source.split('/').enumerate() {
            if i > 0 {
                expression.push('/');
            }
            match segment.strip_prefix(':') {
                Some("") => {
                    return Err(RouterError::pattern(&source, "parameter name is empty"));
                }
                Some(name) => {
                    if parameter_names.iter().any(|n| n == name) {
                        return Err(RouterError::pattern(
                            &source,
                            format!("parameter '{}' appears more than once", name),
                        ));
                    }
                    parameter_names.push(name.to_string());
                    expression.push_str(PARAMETER_CAPTURE);
                }
                None => expression.push_str(&regex::escape(segment)),
            }
        }
        expression.push('$');

        let regex = Regex::new(&expression)
            .map_err(|e| RouterError::pattern(&source, e.to_string()))?;

        debug_assert_eq!(regex.captures_len() - 1, parameter_names.len());

        Ok(Self {
            segment_count: segment_count(&source),
            source,
            parameter_names,
            regex,
        })
    }

    /// The pattern as it was registered.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Parameter names in the order they appear in the pattern.
    pub fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }

    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Returns true if `path` has the same segment count and matches in full.
    pub fn matches(&self, path: &str) -> bool {
        segment_count(path) == self.segment_count && self.regex.is_match(path)
    }

    /// Match `path` and return the captured values in pattern order.
    pub fn captures<'p>(&self, path: &'p str) -> Option<Vec<&'p str>> {
        if segment_count(path) != self.segment_count {
            return None;
        }
        let caps = self.regex.captures(path)?;
        caps.iter()
            .skip(1)
            .map(|m| m.map(|m| m.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPLOYMENT: &str = "/namespaces/:namespace/deployments/:deployment";

    #[test]
    fn test_compile_deployment_pattern() {
        let pattern = PathPattern::compile(DEPLOYMENT).unwrap();

        assert_eq!(pattern.as_str(), DEPLOYMENT);
        assert_eq!(pattern.parameter_names(), ["namespace", "deployment"]);
        assert_eq!(pattern.segment_count(), 4);
        assert!(pattern.matches("/namespaces/bookinfo/deployments/ratings"));
        assert_eq!(
            pattern.captures("/namespaces/bookinfo/deployments/ratings"),
            Some(vec!["bookinfo", "ratings"])
        );
    }

    #[test]
    fn test_segment_count() {
        assert_eq!(segment_count("/"), 1);
        assert_eq!(segment_count("/a"), 1);
        assert_eq!(segment_count("/a/b"), 2);
        assert_eq!(segment_count("/a/b/"), 3);
    }

    #[test]
    fn test_segment_count_mismatch_never_matches() {
        let pattern = PathPattern::compile("/users/:name").unwrap();

        assert!(pattern.matches("/users/alice"));
        assert!(!pattern.matches("/users/alice/"));
        assert!(!pattern.matches("/users/alice/books"));
        assert!(!pattern.matches("/users"));
    }

    #[test]
    fn test_parameters_are_lowercase_letters_only() {
        let pattern = PathPattern::compile(DEPLOYMENT).unwrap();

        assert!(!pattern.matches("/namespaces/ns1/deployments/ratings"));
        assert!(!pattern.matches("/namespaces/Bookinfo/deployments/ratings"));
        assert!(!pattern.matches("/namespaces/book-info/deployments/ratings"));
        assert!(!pattern.matches("/namespaces//deployments/ratings"));
        assert_eq!(pattern.captures("/namespaces/ns1/deployments/ratings"), None);
    }

    #[test]
    fn test_literal_segments_match_exactly() {
        let pattern = PathPattern::compile("/v1.0/items/:item").unwrap();

        assert!(pattern.matches("/v1.0/items/apple"));
        assert!(!pattern.matches("/v1x0/items/apple"));
        assert!(!pattern.matches("/v1.0/Items/apple"));
        assert!(!pattern.matches("/prefix/v1.0/items/apple"));
    }

    #[test]
    fn test_pattern_without_parameters() {
        let pattern = PathPattern::compile("/health").unwrap();

        assert!(pattern.parameter_names().is_empty());
        assert_eq!(pattern.captures("/health"), Some(vec![]));
        assert!(!pattern.matches("/healthz"));
    }

    #[test]
    fn test_rejects_malformed_patterns() {
        for bad in ["namespaces/:namespace", "", "/a/:", "/a/:x/b/:x"] {
            match PathPattern::compile(bad) {
                Err(RouterError::PatternCompile { pattern, .. }) => assert_eq!(pattern, bad),
                other => panic!("expected compile error for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_repeated_parameter_name_is_rejected() {
        match PathPattern::compile("/a/:x/b/:x") {
            Err(RouterError::PatternCompile { reason, .. }) => {
                assert_eq!(reason, "parameter 'x' appears more than once")
            }
            other => panic!("expected compile error, got {:?}", other),
        }
    }
}
