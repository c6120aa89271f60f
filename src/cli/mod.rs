//! # CLI Module
//!
//! Command-line access to the resolver, mainly for checking a routing
//! configuration before deploying it.
//!
//! ## Commands
//!
//! ### `resolve`
//!
//! Resolve request paths and print each route as JSON:
//!
//! ```bash
//! mvcroute resolve --config routes.yaml /blog/post/show.json /news
//! ```
//!
//! A path that does not resolve prints `{"url": ..., "error": ...}` and makes
//! the process exit with status 1.
//!
//! ### `canonical`
//!
//! Print the canonical internal path (`/Module/Controller/Action`) of each
//! resolved path:
//!
//! ```bash
//! mvcroute canonical --config routes.yaml /shop/cart/add
//! ```
//!
//! ### `lint`
//!
//! Compile the configuration and list its rules in matching order:
//!
//! ```bash
//! mvcroute lint --config routes.yaml
//! ```
//!
//! `--config` falls back to the `MVCR_CONFIG` environment variable, and
//! `--log-level` to `MVCR_LOG_LEVEL`.

mod commands;


pub use commands::{run_cli, run_command, Cli, Commands};
