//! # mvcroute
//!
//! **mvcroute** turns request paths such as `/blog/post/show.json` into a
//! [`Route`]: a module, a controller, an action, named parameters and a
//! response format. It is the front half of an MVC dispatcher; invoking the
//! controller is left to the caller.
//!
//! ## Resolution protocol
//!
//! 1. Strip a recognized extension (`html`, `json` by default) from the path.
//!    It becomes the route's format.
//! 2. Try the ordered rule table. The first URL template that matches the
//!    whole base path renders its target into an internal path
//!    `/module/controller/action(key=value,...)`, which is parsed into the
//!    route.
//! 3. Otherwise interpret up to three path segments by convention, asking a
//!    [`Registry`] which modules and controllers exist.
//!
//! ```mermaid
//! flowchart LR
//!     URL --> split[split_external]
//!     split --> rules{RuleTable}
//!     rules -- match --> parse[parse_internal]
//!     rules -- miss --> guess[convention::guess]
//!     parse --> Route
//!     guess --> Route
//!     guess -- nothing --> NotFound[RouterError::RouteNotFound]
//! ```
//!
//! ## Architecture
//!
//! - **[`route`]** - the resolved [`Route`] value and its canonical form
//! - **[`router`]** - templates, rule table, path splitting, convention
//!   resolution and the [`Router`] tying them together
//! - **[`registry`]** - the module/controller existence oracle
//! - **[`config`]** - YAML/TOML/JSON routing configuration
//! - **[`runtime_config`]** - environment tuning
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - the `mvcroute` command
//!
//! ## Example
//!
//! ```
//! use mvcroute::{RuleTable, Router, StaticRegistry};
//!
//! let rules = RuleTable::from_pairs([("/post/<0>", "/blog/post/show(id=<0>)")]).unwrap();
//! let registry = StaticRegistry::new().with_controller("News");
//! let router = Router::new(rules, registry);
//!
//! let route = router.resolve("/post/42.json").unwrap();
//! assert_eq!(route.action(), "show");
//! assert_eq!(route.params().get("id"), Some("42"));
//! assert_eq!(route.format(), "json");
//!
//! let route = router.resolve("/news/latest").unwrap();
//! assert_eq!(route.to_internal_path(), "//News/Latest");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod route;
pub mod router;
pub mod runtime_config;

pub use config::{load_config, load_router, RouterConfig};
pub use error::{ConfigError, RouterError};
pub use registry::{FnRegistry, Registry, StaticRegistry};
pub use route::{Params, Route};
pub use router::{Router, RuleTable};
pub use runtime_config::RuntimeConfig;
