use crate::config::{load_config, load_router};
use crate::runtime_config::RuntimeConfig;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// Command-line interface for mvcroute
///
/// Resolves request paths against a routing configuration and checks
/// configuration files.
#[derive(Parser)]
#[command(name = "mvcroute")]
#[command(about = "Resolve request paths into module/controller/action routes", long_about = None)]
pub struct Cli {
    /// Log level for resolution events written to stderr
    #[arg(long, global = true, env = "MVCR_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve request paths and print each route as JSON
    Resolve {
        /// Routing configuration file (YAML, TOML or JSON)
        #[arg(short, long, env = "MVCR_CONFIG")]
        config: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long, default_value_t = false)]
        pretty: bool,

        /// Request paths, e.g. /blog/post/show.json
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Resolve request paths and print their canonical internal paths
    Canonical {
        /// Routing configuration file (YAML, TOML or JSON)
        #[arg(short, long, env = "MVCR_CONFIG")]
        config: PathBuf,

        /// Request paths
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Check a routing configuration and summarize it
    ///
    /// Compiles every rule (rejecting repeated or unknown placeholders and
    /// empty extensions) and prints the rule table.
    Lint {
        /// Routing configuration file (YAML, TOML or JSON)
        #[arg(short, long, env = "MVCR_CONFIG")]
        config: PathBuf,
    },
}

/// Execute a parsed command, writing results to `out`.
///
/// Returns `Ok(false)` when at least one path failed to resolve; per-path
/// errors are reported in the output rather than aborting the run.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or is invalid, or
/// if writing to `out` fails.
pub fn run_command<W: Write>(command: &Commands, out: &mut W) -> Result<bool> {
    match command {
        Commands::Resolve {
            config,
            pretty,
            urls,
        } => {
            let router = load_router(config)?;
            let mut all_ok = true;
            for url in urls {
                match router.resolve(url) {
                    Ok(route) => {
                        let json = if *pretty {
                            serde_json::to_string_pretty(&route)?
                        } else {
                            serde_json::to_string(&route)?
                        };
                        writeln!(out, "{json}")?;
                    }
                    Err(err) => {
                        all_ok = false;
                        let json = serde_json::json!({ "url": url, "error": err.to_string() });
                        writeln!(out, "{json}")?;
                    }
                }
            }
            Ok(all_ok)
        }
        Commands::Canonical { config, urls } => {
            let router = load_router(config)?;
            let mut all_ok = true;
            for url in urls {
                match router.resolve(url) {
                    Ok(route) => writeln!(out, "{url}\t{}", route.to_internal_path())?,
                    Err(err) => {
                        all_ok = false;
                        writeln!(out, "{url}\terror: {err}")?;
                    }
                }
            }
            Ok(all_ok)
        }
        Commands::Lint { config } => {
            let loaded = load_config(config)?;
            let modules = loaded.registry.module_count();
            let controllers = loaded.registry.controller_count();
            let router = loaded
                .build_router_with(&RuntimeConfig::from_env())
                .with_context(|| format!("invalid routing config {}", config.display()))?;

            writeln!(
                out,
                "OK: {} rule(s), extensions [{}], default format {}, {} module(s), {} controller(s)",
                router.rules().len(),
                router.extensions().join(", "),
                router.default_format(),
                modules,
                controllers
            )?;
            for (i, rule) in router.rules().iter().enumerate() {
                writeln!(
                    out,
                    "  {i:>3}  {} -> {}",
                    rule.url().as_str(),
                    rule.target().as_str()
                )?;
            }
            Ok(true)
        }
    }
}

/// Parse the command line, initialize logging and run the command.
///
/// Returns whether every requested path resolved.
///
/// # Errors
///
/// See [`run_command`].
pub fn run_cli() -> Result<bool> {
    let cli = Cli::parse();
    if let Err(e) = crate::logging::init_logging(&cli.log_level) {
        eprintln!("logging disabled: {e:#}");
    }
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_command(&cli.command, &mut out)
}
