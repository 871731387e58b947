//! fluxdoc CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments or configuration
//! - 3: Validation failure

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fluxdoc_rules::{ConfigError, RuleError};

mod commands;

use commands::{Cli, Commands, ViolationsFound};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the result
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fluxdoc={level},{}", fallback_level(level))));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let root = cli.root.as_path();
    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Check(args) => commands::check::execute(root, config, args),
        Commands::Routes(args) => commands::routes::execute(root, config, args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Level for targets outside this workspace.
fn fallback_level(level: &str) -> &str {
    if level == "error" {
        "error"
    } else {
        "warn"
    }
}

/// Map an error to its exit code by type.
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<ViolationsFound>().is_some() {
        return ExitCodes::VALIDATION_FAILURE;
    }
    if e.downcast_ref::<ConfigError>().is_some() {
        return ExitCodes::INVALID_ARGS;
    }
    if let Some(RuleError::Config(_)) = e.downcast_ref::<RuleError>() {
        return ExitCodes::INVALID_ARGS;
    }
    // Missing or unreadable inputs, including `CorpusError`
    ExitCodes::GENERAL_ERROR
}
