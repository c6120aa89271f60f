//! Router core module - the resolution entry point.
//!
//! Ties the pieces together: split the extension off the request path, try
//! the rule table, parse the rendered internal path, and fall back to
//! convention resolution when no rule matches.

use super::convention;
use super::path::{parse_internal, segments, split_external, ExternalPath};
use super::rules::RuleTable;
use crate::error::{ConfigError, RouterError};
use crate::registry::Registry;
use crate::route::{Route, DEFAULT_EXTENSIONS, DEFAULT_FORMAT};
use crate::runtime_config::RuntimeConfig;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Resolves request paths into [`Route`]s.
///
/// Holds the rule table, the recognized extensions and the registry used
/// for convention resolution. Nothing changes after construction, so a
/// `Router` can be shared by reference (or in an `Arc`) between threads as
/// long as its registry is `Sync`.
///
/// # Example
///
/// ```rust
/// use mvcroute::registry::StaticRegistry;
/// use mvcroute::router::{RuleTable, Router};
///
/// let rules = RuleTable::from_pairs([("/post/<0>", "/blog/post/show(id=<0>)")]).unwrap();
/// let registry = StaticRegistry::new().with_module("Blog", ["Post"]);
/// let router = Router::new(rules, registry);
///
/// let route = router.resolve("/post/42.json").unwrap();
/// assert_eq!(route.module(), "blog");
/// assert_eq!(route.params().get("id"), Some("42"));
/// assert_eq!(route.format(), "json");
///
/// let route = router.resolve("/blog/post").unwrap();
/// assert_eq!(route.controller(), "Post");
/// ```
#[derive(Debug, Clone)]
pub struct Router<R> {
    rules: RuleTable,
    extensions: Vec<String>,
    default_format: String,
    registry: R,
    slow_threshold: Duration,
}

impl<R: Registry> Router<R> {
    /// Create a router with the default extensions (`html`, `json`) and
    /// default format (`html`).
    #[must_use]
    pub fn new(rules: RuleTable, registry: R) -> Self {
        let router = Self {
            rules,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            default_format: DEFAULT_FORMAT.to_string(),
            registry,
            slow_threshold: RuntimeConfig::default().slow_resolve_threshold,
        };

        let rules_summary: Vec<String> = router
            .rules
            .iter()
            .take(10)
            .map(|rule| format!("{} -> {}", rule.url().as_str(), rule.target().as_str()))
            .collect();

        info!(
            rules_count = router.rules.len(),
            rules_summary = ?rules_summary,
            extensions = ?router.extensions,
            "Routing table loaded"
        );

        router
    }

    /// Replace the recognized extensions; order is precedence order.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyExtension`] when any extension is empty.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extensions: Vec<String> = extensions
            .into_iter()
            .map(|e| e.into().trim_start_matches('.').to_string())
            .collect();
        if extensions.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyExtension);
        }
        self.extensions = extensions;
        Ok(self)
    }

    /// Format used when the request path carries no recognized extension
    #[must_use]
    pub fn with_default_format(mut self, format: impl Into<String>) -> Self {
        self.default_format = format.into();
        self
    }

    /// Apply environment-driven tuning
    #[must_use]
    pub fn with_runtime_config(mut self, config: &RuntimeConfig) -> Self {
        self.slow_threshold = config.slow_resolve_threshold;
        self
    }

    /// Resolve a request path into a [`Route`].
    ///
    /// 1. Split the recognized extension off the path.
    /// 2. Try the rule table on the base path; on a hit, parse the rendered
    ///    internal path.
    /// 3. Otherwise guess from the base path's non-empty segments.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InvalidInternalPath`] when a matching rule renders
    ///   a malformed internal path
    /// - [`RouterError::RouteNotFound`] naming the base path when convention
    ///   resolution finds nothing
    pub fn resolve(&self, url: &str) -> Result<Route, RouterError> {
        debug!(url = %url, "Route resolution attempt");
        let started = Instant::now();

        let ExternalPath { base, extension } = split_external(url, &self.extensions);
        let format = if extension.is_empty() {
            self.default_format.as_str()
        } else {
            extension.as_str()
        };

        if let Some(hit) = self.rules.resolve(&base) {
            return match parse_internal(&hit.internal_path) {
                Ok(route) => {
                    let route = route.with_format(format);
                    self.log_resolved(url, &route, "rule_table", started.elapsed());
                    Ok(route)
                }
                Err(err) => {
                    warn!(
                        url = %url,
                        base = %base,
                        rule_index = hit.rule_index,
                        internal_path = %hit.internal_path,
                        "Routing rule produced an invalid internal path"
                    );
                    Err(err)
                }
            };
        }

        let parts = segments(&base);
        match convention::guess(&parts, format, &self.registry) {
            Ok(route) => {
                self.log_resolved(url, &route, "convention", started.elapsed());
                Ok(route)
            }
            Err(_) => {
                warn!(
                    url = %url,
                    base = %base,
                    segments = parts.len(),
                    duration_us = started.elapsed().as_micros(),
                    "No route matched"
                );
                Err(RouterError::RouteNotFound { path: base })
            }
        }
    }

    fn log_resolved(&self, url: &str, route: &Route, source: &'static str, elapsed: Duration) {
        if elapsed > self.slow_threshold {
            warn!(
                url = %url,
                source,
                module = %route.module(),
                controller = %route.controller(),
                action = %route.action(),
                format = %route.format(),
                duration_us = elapsed.as_micros(),
                "Slow route resolution detected"
            );
        } else {
            info!(
                url = %url,
                source,
                module = %route.module(),
                controller = %route.controller(),
                action = %route.action(),
                format = %route.format(),
                duration_us = elapsed.as_micros(),
                "Route resolved"
            );
        }
    }

    #[must_use]
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    #[must_use]
    pub fn default_format(&self) -> &str {
        &self.default_format
    }
}
