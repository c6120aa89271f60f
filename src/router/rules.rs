//! Ordered rule table: URL templates mapped to internal-path templates.
//!
//! Rules are tried in declaration order and the first match wins. Each rule
//! is compiled once when the table is built; resolution only runs the
//! prepared matchers and substitutes captures into the target.

use super::template::{Captures, TargetTemplate, UrlTemplate};
use crate::error::ConfigError;
use tracing::debug;

/// One compiled routing rule
#[derive(Debug, Clone)]
pub struct Rule {
    url: UrlTemplate,
    target: TargetTemplate,
}

impl Rule {
    /// Compile a rule from its URL template and internal-path target.
    ///
    /// # Errors
    ///
    /// Fails when the URL template is invalid or the target references a
    /// placeholder the URL template does not capture.
    pub fn new(url: &str, target: &str) -> Result<Self, ConfigError> {
        let url = UrlTemplate::compile(url)?;
        let target = TargetTemplate::parse(target)?;
        if let Some(index) = target.slots().find(|i| !url.captures_index(*i)) {
            return Err(ConfigError::UnknownPlaceholder {
                template: url.as_str().to_string(),
                target: target.as_str().to_string(),
                index,
            });
        }
        Ok(Self { url, target })
    }

    #[must_use]
    pub fn url(&self) -> &UrlTemplate {
        &self.url
    }

    #[must_use]
    pub fn target(&self) -> &TargetTemplate {
        &self.target
    }
}

/// Result of a rule-table hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Position of the matching rule in the table
    pub rule_index: usize,
    /// Values captured from the base path
    pub captures: Captures,
    /// Target template with captures substituted
    pub internal_path: String,
}

/// Ordered collection of compiled rules
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// An empty table; every path falls through to convention resolution
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `(url template, target template)` pairs, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] met while compiling.
    pub fn from_pairs<I, U, T>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (U, T)>,
        U: AsRef<str>,
        T: AsRef<str>,
    {
        let rules = pairs
            .into_iter()
            .map(|(url, target)| Rule::new(url.as_ref(), target.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Find the first rule matching `base_path` and render its target.
    ///
    /// `None` is a miss, not a failure: the caller falls back to convention
    /// resolution.
    #[must_use]
    pub fn resolve(&self, base_path: &str) -> Option<RuleMatch> {
        self.rules.iter().enumerate().find_map(|(rule_index, rule)| {
            let captures = rule.url.matches(base_path)?;
            let internal_path = rule.target.render(&captures);
            debug!(
                base_path = %base_path,
                rule_index,
                url_template = %rule.url.as_str(),
                internal_path = %internal_path,
                "Rule template matched"
            );
            Some(RuleMatch {
                rule_index,
                captures,
                internal_path,
            })
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
