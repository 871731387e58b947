//! CLI command definitions.
//!
//! Each subcommand maps to one entry point of the documentation checker.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use thiserror::Error;

use fluxdoc_rules::DocsConfig;

pub mod check;
pub mod routes;

/// fluxdoc - documentation integrity checker for the Fluxon docs site
#[derive(Parser)]
#[command(name = "fluxdoc")]
#[command(version, about = "fluxdoc - documentation integrity checker for Mintlify docs")]
#[command(long_about = r#"
fluxdoc validates a Mintlify documentation tree against its navigation manifest
and publication conventions before the site is built.

COMMANDS:
  check   → Run every integrity check (fail-fast by default)
  routes  → Print the route table derived from the docs tree

ENVIRONMENT:
  FLUXDOC_CONFIG                      Config file, same as --config
  FLUXON_DOCS_MAX_VISIBLE_LINE_WIDTH  Visible line width limit (<= 0 disables)
  FLUXON_DOCS_MAX_LINE_WIDTH          Deprecated alias of the above

EXIT CODES:
  0 - Success
  1 - General error (missing or unreadable input)
  2 - Invalid arguments or configuration
  3 - Validation failure
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Repository root
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Config file (defaults to <root>/fluxdoc.toml when present)
    #[arg(long, global = true, env = "FLUXDOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check the docs tree and report violations
    Check(check::CheckArgs),

    /// Print every route and the page serving it
    Routes(routes::RoutesArgs),
}

/// Raised when the checks ran to completion but found problems.
#[derive(Debug, Error)]
#[error("{count} violation(s) found")]
pub struct ViolationsFound {
    pub count: usize,
}

/// Defaults, then the config file, then environment overrides.
///
/// Fails before any page is read when a value is invalid.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<DocsConfig> {
    let mut config = DocsConfig::discover(root, explicit)?;
    config.apply_env()?;
    Ok(config)
}
