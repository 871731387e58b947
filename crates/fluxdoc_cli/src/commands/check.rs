//! Check command - Run the documentation integrity checks.
//!
//! Prints `OK` on success. Violations go to stderr as diagnostics, or to stdout
//! as a JSON report with `--format json`.

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::info;

use fluxdoc_rules::{CheckEngine, DocsWorkspace, RunMode, RunOutcome, Violation};

use super::{load_config, ViolationsFound};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Docs root relative to the repository root
    #[arg(long)]
    docs_root: Option<PathBuf>,

    /// Visible line width limit; zero or less disables the width check
    #[arg(long, allow_hyphen_values = true)]
    max_visible_width: Option<i64>,

    /// Report every violation instead of stopping at the first
    #[arg(long)]
    keep_going: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct Report<'a> {
    passed: bool,
    #[serde(flatten)]
    outcome: &'a RunOutcome,
}

pub fn execute(root: &Path, config_path: Option<&Path>, args: CheckArgs) -> Result<()> {
    run(
        root,
        config_path,
        args,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
}

/// Run the checks and write the result: `OK` or the JSON report to `stdout`,
/// text diagnostics to `stderr`.
pub fn run(
    root: &Path,
    config_path: Option<&Path>,
    args: CheckArgs,
    stdout: &mut dyn io::Write,
    stderr: &mut dyn io::Write,
) -> Result<()> {
    let mut config = load_config(root, config_path)?;
    if let Some(docs_root) = args.docs_root {
        config.docs_root = docs_root;
    }
    if let Some(width) = args.max_visible_width {
        config.max_visible_width = width;
    }

    let mode = if args.keep_going {
        RunMode::KeepGoing
    } else {
        RunMode::FailFast
    };
    info!("Checking docs under {:?}", root.join(&config.docs_root));

    let workspace = DocsWorkspace::load(root, config)?;
    let outcome = CheckEngine::standard()
        .with_mode(mode)
        .run(&workspace.context())?;

    match args.format {
        OutputFormat::Json => {
            let report = Report {
                passed: outcome.passed(),
                outcome: &outcome,
            };
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            writeln!(stdout, "{}", json)?;
        }
        OutputFormat::Text => {
            for violation in &outcome.violations {
                writeln!(stderr, "{}", render_violation(violation))?;
            }
            if outcome.passed() {
                writeln!(stdout, "OK")?;
            }
        }
    }

    if outcome.passed() {
        Ok(())
    } else {
        Err(ViolationsFound {
            count: outcome.violations.len(),
        }
        .into())
    }
}

/// Human-readable diagnostic for one violation.
pub fn render_violation(violation: &Violation) -> String {
    let mut out = format!("error[{}]: {}\n  --> {}", violation.rule, violation.message, violation.location());
    if let Some(hint) = &violation.hint {
        let mut lines = hint.lines();
        if let Some(first) = lines.next() {
            let _ = write!(out, "\n  hint: {first}");
        }
        for line in lines {
            let _ = write!(out, "\n        {line}");
        }
    }
    out
}
