//! Error types for route resolution and rule-table configuration.
//!
//! A rule-table miss is not an error: [`RuleTable::resolve`](crate::router::RuleTable::resolve)
//! returns `None` and the router falls through to convention resolution.

use std::fmt;

/// Failure to resolve a request path into a [`Route`](crate::route::Route)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// The internal path does not follow `/module/controller/action(params)`
    InvalidInternalPath {
        /// The offending internal path
        path: String,
    },
    /// Neither the rule table nor convention resolution produced a route
    RouteNotFound {
        /// The base path (extension already stripped)
        path: String,
    },
}

impl RouterError {
    /// The path the error refers to
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            RouterError::InvalidInternalPath { path } | RouterError::RouteNotFound { path } => path,
        }
    }
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::InvalidInternalPath { path } => {
                write!(f, "Invalid route '{path}'")
            }
            RouterError::RouteNotFound { path } => {
                write!(f, "Route to path '{path}' is not found")
            }
        }
    }
}

impl std::error::Error for RouterError {}

/// Invalid routing configuration
///
/// Returned while compiling the rule table or the extension list, before any
/// request is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A URL template uses the same `<N>` placeholder more than once
    RepeatedPlaceholder {
        /// The URL template
        template: String,
        /// The repeated index
        index: usize,
    },
    /// A target template references an index its URL template never captures
    UnknownPlaceholder {
        /// The URL template
        template: String,
        /// The target template
        target: String,
        /// The missing index
        index: usize,
    },
    /// The template could not be compiled into a matcher
    InvalidTemplate {
        /// The URL template
        template: String,
        /// Compiler message
        reason: String,
    },
    /// An empty string was configured as a recognized extension
    EmptyExtension,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::RepeatedPlaceholder { template, index } => {
                write!(
                    f,
                    "Routing configuration error: placeholder <{index}> is used more than once in '{template}'"
                )
            }
            ConfigError::UnknownPlaceholder {
                template,
                target,
                index,
            } => {
                write!(
                    f,
                    "Routing configuration error: target '{target}' references <{index}>, \
                    which '{template}' does not capture"
                )
            }
            ConfigError::InvalidTemplate { template, reason } => {
                write!(
                    f,
                    "Routing configuration error: cannot compile '{template}': {reason}"
                )
            }
            ConfigError::EmptyExtension => {
                write!(
                    f,
                    "Routing configuration error: recognized extensions must not be empty"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
