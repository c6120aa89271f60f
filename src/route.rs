//! # Route
//!
//! The resolved descriptor for one request: which module, controller and
//! action should handle it, the parameters captured along the way and the
//! output format.
//!
//! A [`Route`] is built once per resolution call and never mutated after it
//! is handed to the caller. Empty controller/action slots are filled with
//! [`DEFAULT_CONTROLLER`] and [`DEFAULT_ACTION`] at construction, so a
//! returned route always names both.
//!
//! ## Canonical internal path
//!
//! [`Route::to_internal_path`] renders `/{module}/{controller}/{action}`,
//! leaving controller and action empty when they equal their defaults.
//! Parameters are not part of the canonical form and are lost on a
//! round-trip through it.
//!
//! ```rust
//! use mvcroute::route::Route;
//!
//! let route = Route::new("Blog", "", "");
//! assert_eq!(route.controller(), "Index");
//! assert_eq!(route.to_internal_path(), "/Blog//");
//! ```

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;

/// Controller used when a path leaves the controller slot empty
pub const DEFAULT_CONTROLLER: &str = "Index";
/// Action used when a path leaves the action slot empty
pub const DEFAULT_ACTION: &str = "default";
/// Output format used when the request path carries no recognized extension
pub const DEFAULT_FORMAT: &str = "html";
/// Recognized extensions, in precedence order
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["html", "json"];

/// Maximum number of inline parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Ordered route parameters.
///
/// Keys keep the position of their first appearance; inserting an existing
/// key overwrites its value, so the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(SmallVec<[(String, String); MAX_INLINE_PARAMS]>);

impl Params {
    /// Create an empty parameter list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((key, value)),
        }
    }

    /// Get a parameter value by name
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Resolved module/controller/action/params/format for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    module: String,
    controller: String,
    action: String,
    params: Params,
    format: String,
}

impl Route {
    /// Build a route, filling empty controller/action slots with their defaults.
    ///
    /// An empty module is kept as is and denotes the root module.
    #[must_use]
    pub fn new(
        module: impl Into<String>,
        controller: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        let controller = controller.into();
        let action = action.into();
        Self {
            module: module.into(),
            controller: if controller.is_empty() {
                DEFAULT_CONTROLLER.to_string()
            } else {
                controller
            },
            action: if action.is_empty() {
                DEFAULT_ACTION.to_string()
            } else {
                action
            },
            params: Params::new(),
            format: DEFAULT_FORMAT.to_string(),
        }
    }

    /// Replace the parameters
    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Replace the output format
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    #[must_use]
    pub fn controller(&self) -> &str {
        &self.controller
    }

    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Canonical internal path, without parameters
    #[must_use]
    pub fn to_internal_path(&self) -> String {
        let controller = if self.controller == DEFAULT_CONTROLLER {
            ""
        } else {
            &self.controller
        };
        let action = if self.action == DEFAULT_ACTION {
            ""
        } else {
            &self.action
        };
        format!("/{}/{}/{}", self.module, controller, action)
    }

    /// Compare module/controller/action, ignoring params and format
    #[must_use]
    pub fn same_target(&self, other: &Route) -> bool {
        self.module == other.module
            && self.controller == other.controller
            && self.action == other.action
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_internal_path())
    }
}

/// Uppercase the first character, leaving the rest untouched
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
