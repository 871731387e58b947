//! The check contract and the shared, read-only inputs every check runs over.

use std::path::Path;

use fluxdoc_corpus::{Corpus, Manifest, RouteTable};

use crate::config::DocsConfig;
use crate::error::RuleResult;
use crate::violation::{RuleId, Violation};

/// Immutable inputs for one validation run.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    pub repo_root: &'a Path,
    pub config: &'a DocsConfig,
    pub corpus: &'a Corpus,
    pub manifest: &'a Manifest,
    pub routes: &'a RouteTable,
}

impl CheckContext<'_> {
    /// Manifest path as shown in diagnostics.
    pub fn manifest_label(&self) -> String {
        slash_path(&self.config.manifest_path())
    }

    /// Build metadata path as shown in diagnostics.
    pub fn metadata_label(&self) -> String {
        slash_path(&self.config.metadata)
    }
}

fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// A single documentation rule.
///
/// Checks are pure over the [`CheckContext`]: they return every violation they find
/// in deterministic order and leave fail-fast policy to the engine. An `Err` is
/// reserved for environment problems that make the check impossible to run.
pub trait DocCheck {
    fn id(&self) -> RuleId;

    /// One-line description used in `--verbose` logs.
    fn description(&self) -> &'static str;

    fn run(&self, ctx: &CheckContext<'_>) -> RuleResult<Vec<Violation>>;
}
