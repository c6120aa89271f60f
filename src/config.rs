//! # Routing Configuration
//!
//! Loads the rule table, the recognized extensions and the module/controller
//! registry from a single file. The format follows the file extension:
//! `.yaml`/`.yml` is YAML, `.toml` is TOML, anything else is JSON.
//!
//! ```yaml
//! extensions: [html, json]
//! default_format: html
//! rules:
//!   /post/<0>: /blog/post/show(id=<0>)
//!   /about: //page/show(slug=about)
//! registry:
//!   controllers: [Page, News]
//!   modules:
//!     Blog: [Post]
//! ```
//!
//! Rules keep the order they are written in. Besides the mapping form above,
//! `rules` may be a list of `{ url, path }` entries, which is the natural
//! shape in TOML:
//!
//! ```toml
//! [[rules]]
//! url = "/post/<0>"
//! path = "/blog/post/show(id=<0>)"
//! ```

use crate::registry::StaticRegistry;
use crate::route::{DEFAULT_EXTENSIONS, DEFAULT_FORMAT};
use crate::router::{RuleTable, Router};
use crate::runtime_config::RuntimeConfig;
use anyhow::{Context, Result};
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::Path;
use tracing::info;

/// Rule table as written in configuration: `(url template, target)` pairs
/// in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRules(pub Vec<(String, String)>);

impl RawRules {
    /// Compile into a [`RuleTable`]
    ///
    /// # Errors
    ///
    /// The first invalid rule.
    pub fn compile(&self) -> Result<RuleTable, crate::error::ConfigError> {
        RuleTable::from_pairs(self.0.iter().map(|(u, t)| (u.as_str(), t.as_str())))
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleEntry {
    url: String,
    path: String,
}

struct RawRulesVisitor;

impl<'de> Visitor<'de> for RawRulesVisitor {
    type Value = RawRules;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of URL templates to internal paths, or a list of { url, path } entries")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawRules, A::Error> {
        let mut rules = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((url, path)) = map.next_entry::<String, String>()? {
            rules.push((url, path));
        }
        Ok(RawRules(rules))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RawRules, A::Error> {
        let mut rules = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(entry) = seq.next_element::<RuleEntry>()? {
            rules.push((entry.url, entry.path));
        }
        Ok(RawRules(rules))
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<RawRules, E> {
        Ok(RawRules::default())
    }
}

impl<'de> Deserialize<'de> for RawRules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawRulesVisitor)
    }
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect()
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

/// Contents of a routing configuration file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Recognized extensions in precedence order
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Format used when no extension is present
    #[serde(default = "default_format")]
    pub default_format: String,
    /// URL template to internal-path template, first match wins
    #[serde(default)]
    pub rules: RawRules,
    /// Declared modules and controllers
    #[serde(default)]
    pub registry: StaticRegistry,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            default_format: default_format(),
            rules: RawRules::default(),
            registry: StaticRegistry::default(),
        }
    }
}

impl RouterConfig {
    /// Parse configuration text; `format_hint` is a file extension
    /// (`yaml`, `yml`, `toml`, anything else is read as JSON).
    ///
    /// # Errors
    ///
    /// Returns the parser error for malformed documents.
    pub fn from_str_with_format(content: &str, format_hint: &str) -> Result<Self> {
        let config: RouterConfig = match format_hint.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => serde_yaml::from_str(content).context("invalid YAML routing config")?,
            "toml" => toml::from_str(content).context("invalid TOML routing config")?,
            _ => serde_json::from_str(content).context("invalid JSON routing config")?,
        };
        Ok(config)
    }

    /// Build a router from this configuration, consuming it.
    ///
    /// # Errors
    ///
    /// Fails when a rule or an extension is invalid.
    pub fn build_router(self) -> Result<Router<StaticRegistry>> {
        self.build_router_with(&RuntimeConfig::from_env())
    }

    /// Same as [`build_router`](Self::build_router) with explicit runtime tuning
    ///
    /// # Errors
    ///
    /// Fails when a rule or an extension is invalid.
    pub fn build_router_with(self, runtime: &RuntimeConfig) -> Result<Router<StaticRegistry>> {
        let rules = self.rules.compile()?;
        let router = Router::new(rules, self.registry)
            .with_extensions(self.extensions)?
            .with_default_format(self.default_format)
            .with_runtime_config(runtime);
        Ok(router)
    }
}

/// Load a routing configuration file
///
/// # Errors
///
/// Fails when the file cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RouterConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read routing config {}", path.display()))?;
    let format_hint = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("json");
    let config = RouterConfig::from_str_with_format(&content, format_hint)
        .with_context(|| format!("failed to parse routing config {}", path.display()))?;

    info!(
        path = %path.display(),
        rules = config.rules.0.len(),
        extensions = ?config.extensions,
        modules = config.registry.module_count(),
        "Routing config loaded"
    );
    Ok(config)
}

/// Load a routing configuration file and build its router
///
/// # Errors
///
/// Fails when the file cannot be loaded or describes invalid rules.
pub fn load_router<P: AsRef<Path>>(path: P) -> Result<Router<StaticRegistry>> {
    let path = path.as_ref();
    load_config(path)?
        .build_router()
        .with_context(|| format!("invalid routing config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    #[test]
    fn test_yaml_rules_keep_document_order() {
        let config = RouterConfig::from_str_with_format(
            "rules:\n  /z: //z/\n  /a: //a/\n  /m/<0>: //m/<0>\n",
            "yaml",
        )
        .unwrap();
        let urls: Vec<_> = config.rules.0.iter().map(|(u, _)| u.as_str()).collect();
        assert_eq!(urls, vec!["/z", "/a", "/m/<0>"]);
    }

    #[test]
    fn test_json_rules_keep_document_order() {
        let config = RouterConfig::from_str_with_format(
            r#"{"rules": {"/z": "//z/", "/a": "//a/"}, "extensions": ["json"]}"#,
            "json",
        )
        .unwrap();
        assert_eq!(
            config.rules.0,
            vec![
                ("/z".to_string(), "//z/".to_string()),
                ("/a".to_string(), "//a/".to_string())
            ]
        );
        assert_eq!(config.extensions, vec!["json".to_string()]);
        assert_eq!(config.default_format, "html");
    }

    #[test]
    fn test_toml_rule_list() {
        let config = RouterConfig::from_str_with_format(
            r#"
extensions = ["html", "json", "xml"]

[[rules]]
url = "/post/<0>"
path = "/blog/post/show(id=<0>)"

[[rules]]
url = "/about"
path = "//page/about"

[registry]
controllers = ["Page"]

[registry.modules]
Blog = ["Post"]
"#,
            "toml",
        )
        .unwrap();
        assert_eq!(config.rules.0.len(), 2);
        assert_eq!(config.rules.0[0].0, "/post/<0>");
        assert_eq!(config.extensions.len(), 3);
        assert!(config.registry.exists_module("blog"));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = RouterConfig::from_str_with_format("{}", "json").unwrap();
        assert!(config.rules.0.is_empty());
        assert_eq!(config.extensions, vec!["html".to_string(), "json".to_string()]);

        let config = RouterConfig::from_str_with_format("rules:\n", "yaml").unwrap();
        assert!(config.rules.0.is_empty());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(RouterConfig::from_str_with_format("routes: {}\n", "yaml").is_err());
    }

    #[test]
    fn test_build_router_rejects_repeated_placeholder() {
        let config =
            RouterConfig::from_str_with_format("rules:\n  /<0>/<0>: //a/\n", "yaml").unwrap();
        let err = config.build_router_with(&RuntimeConfig::default()).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_build_router_resolves() {
        let config = RouterConfig::from_str_with_format(
            "rules:\n  /post/<0>: /blog/post/show(id=<0>)\nregistry:\n  modules:\n    Blog: [Post]\n",
            "yml",
        )
        .unwrap();
        let router = config.build_router_with(&RuntimeConfig::default()).unwrap();
        let route = router.resolve("/post/9.json").unwrap();
        assert_eq!(route.params().get("id"), Some("9"));
        assert_eq!(route.format(), "json");
    }
}
