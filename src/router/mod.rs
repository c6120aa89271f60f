//! # Router Module
//!
//! Turns a request path such as `/blog/post/show.json` into a
//! [`Route`](crate::route::Route): module, controller, action, parameters and
//! output format.
//!
//! ## Overview
//!
//! Resolution combines two strategies:
//!
//! 1. **Rule table** - an ordered list of URL templates (`/post/<0>`) mapped
//!    to internal paths (`/blog/post/show(id=<0>)`). The first template that
//!    matches the whole base path wins and its captures are substituted into
//!    the target.
//! 2. **Convention** - when no rule matches, up to three bare segments are
//!    read as module/controller/action, disambiguated by asking the
//!    [`Registry`](crate::registry::Registry) which modules and controllers
//!    exist.
//!
//! ## Architecture
//!
//! - [`template`] - `<N>` placeholder templates, compiled once
//! - [`rules`] - the ordered rule table
//! - [`path`] - extension splitting and internal-path parsing
//! - [`convention`] - the decision table for bare segments
//! - `core` - the [`Router`] tying them together
//!
//! ## Example
//!
//! ```rust
//! use mvcroute::registry::StaticRegistry;
//! use mvcroute::router::{RuleTable, Router};
//!
//! let rules = RuleTable::from_pairs([("/about", "//page/show(slug=about)")]).unwrap();
//! let router = Router::new(rules, StaticRegistry::new().with_module("Blog", ["Post"]));
//!
//! let route = router.resolve("/about").unwrap();
//! assert_eq!(route.controller(), "page");
//!
//! let route = router.resolve("/blog.json").unwrap();
//! assert_eq!(route.module(), "Blog");
//! assert_eq!(route.format(), "json");
//! ```

pub mod convention;
mod core;
pub mod path;
pub mod rules;
pub mod template;
#[cfg(test)]
mod tests;
#[cfg(test)]
mod performance_tests;

pub use self::core::Router;
pub use convention::{guess, Decision, Probe, Slot, DECISION_TABLE};
pub use path::{parse_internal, segments, split_external, ExternalPath};
pub use rules::{Rule, RuleMatch, RuleTable};
pub use template::{Captures, TargetTemplate, UrlTemplate};
