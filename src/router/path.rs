//! Path splitting: external request paths and internal route paths.
//!
//! - [`split_external`] separates a recognized format extension (`.json`)
//!   from the base path.
//! - [`parse_internal`] decomposes `/module/controller/action(k=v,...)` into
//!   a [`Route`].
//! - [`segments`] yields the non-empty `/`-delimited parts of a base path
//!   for convention resolution.

use crate::error::RouterError;
use crate::route::{Params, Route};
use once_cell::sync::Lazy;
use regex::Regex;

/// `/module/controller/action` optionally followed by `(params)`.
/// The `/action` part may be left out entirely (`//`, `/shop/cart`).
static INTERNAL_PATH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/([^/]*?)/([^/]*?)(?:/([^/]*?))?(\((.*)\))?$")
        .expect("internal path regex should be valid")
});

/// A request path with its format extension separated out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalPath {
    /// Path without the extension; `/` when nothing else remains
    pub base: String,
    /// Recognized extension without the dot, or empty
    pub extension: String,
}

/// Split a recognized extension off a request path.
///
/// Extensions are checked in the given order and the first one whose
/// `.ext` occurs anywhere in the url wins. Every occurrence of it is
/// removed, so `/a.json/b.json` splits into `/a/b` and `json`.
///
/// ```rust
/// use mvcroute::router::split_external;
///
/// let split = split_external("/blog/post/show.json", &["html", "json"]);
/// assert_eq!(split.base, "/blog/post/show");
/// assert_eq!(split.extension, "json");
/// ```
pub fn split_external<S: AsRef<str>>(url: &str, extensions: &[S]) -> ExternalPath {
    for ext in extensions {
        let ext = ext.as_ref();
        if ext.is_empty() {
            continue;
        }
        let dotted = format!(".{ext}");
        if url.contains(&dotted) {
            let mut base = url.replace(&dotted, "");
            if base.is_empty() {
                base.push('/');
            }
            return ExternalPath {
                base,
                extension: ext.to_string(),
            };
        }
    }
    ExternalPath {
        base: if url.is_empty() {
            "/".to_string()
        } else {
            url.to_string()
        },
        extension: String::new(),
    }
}

/// Parse an internal path into a [`Route`].
///
/// Empty controller/action segments receive their defaults; the module may
/// stay empty. Parameters are `key=value` pairs separated by commas, split on
/// the first `=`, trimmed, and a repeated key overwrites the earlier value.
/// A value keeps any further `=` (`q=x=y` gives `x=y`) rather than being
/// cut at the second one.
///
/// # Errors
///
/// [`RouterError::InvalidInternalPath`] when the string does not follow the
/// grammar at all.
pub fn parse_internal(path: &str) -> Result<Route, RouterError> {
    let caps = INTERNAL_PATH_REGEX
        .captures(path)
        .ok_or_else(|| RouterError::InvalidInternalPath {
            path: path.to_string(),
        })?;

    let segment = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    let params = caps
        .get(5)
        .map(|m| parse_params(m.as_str()))
        .unwrap_or_default();

    Ok(Route::new(segment(1), segment(2), segment(3)).with_params(params))
}

fn parse_params(list: &str) -> Params {
    list.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (pair, ""),
        })
        .collect()
}

/// Non-empty `/`-delimited segments of a base path
#[must_use]
pub fn segments(base: &str) -> Vec<&str> {
    base.split('/').filter(|s| !s.is_empty()).collect()
}
