//! # Runtime Configuration Module
//!
//! Environment variable-based tuning for the resolver's runtime behavior.
//!
//! ## Environment Variables
//!
//! ### `MVCR_SLOW_RESOLVE_US`
//!
//! Resolution time, in microseconds, above which a resolved route is logged
//! at `WARN` instead of `INFO`. Accepts decimal (`1000`) or hexadecimal
//! (`0x3e8`) values.
//!
//! Default: `1000` (1 ms)
//!
//! ## Usage
//!
//! ```rust
//! use mvcroute::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Slow threshold: {:?}", config.slow_resolve_threshold);
//! ```

use std::env;
use std::time::Duration;

/// Default slow-resolution threshold in microseconds
pub const DEFAULT_SLOW_RESOLVE_US: u64 = 1000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Resolutions slower than this are logged as warnings
    pub slow_resolve_threshold: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            slow_resolve_threshold: Duration::from_micros(DEFAULT_SLOW_RESOLVE_US),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let slow_us = env::var("MVCR_SLOW_RESOLVE_US")
            .ok()
            .and_then(|val| parse_micros(&val))
            .unwrap_or(DEFAULT_SLOW_RESOLVE_US);
        RuntimeConfig {
            slow_resolve_threshold: Duration::from_micros(slow_us),
        }
    }
}

fn parse_micros(val: &str) -> Option<u64> {
    let val = val.trim();
    match val.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    }
}
