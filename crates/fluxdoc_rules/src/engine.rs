//! Check engine.
//!
//! Loads the corpus, manifest and route table once and runs every registered check
//! over them in a fixed order. By default the first violation ends the run.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use fluxdoc_corpus::{Corpus, Manifest, RouteTable};

use crate::check::{CheckContext, DocCheck};
use crate::config::DocsConfig;
use crate::error::RuleResult;
use crate::frontmatter::FrontmatterCheck;
use crate::links::{ClickableReferenceCheck, LinkResolvesCheck, RouteUniqueCheck};
use crate::navigation::{ManifestGithubCheck, PageExistsCheck};
use crate::style::{FenceConventionCheck, LineWidthCheck};
use crate::version::VersionPinCheck;
use crate::violation::{RuleId, Violation};

/// How the engine reacts to a violation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Stop at the first violation.
    #[default]
    FailFast,
    /// Run every check and report all violations.
    KeepGoing,
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub checks_run: Vec<RuleId>,
    pub violations: Vec<Violation>,
}

impl RunOutcome {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// The violation that ends a fail-fast run.
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }
}

/// Everything loaded from disk for one run.
#[derive(Debug)]
pub struct DocsWorkspace {
    pub repo_root: PathBuf,
    pub config: DocsConfig,
    pub corpus: Corpus,
    pub manifest: Manifest,
    pub routes: RouteTable,
}

impl DocsWorkspace {
    /// Read the manifest and corpus and build the route table.
    pub fn load(repo_root: impl AsRef<Path>, config: DocsConfig) -> RuleResult<Self> {
        let repo_root = repo_root.as_ref().to_path_buf();
        let manifest = Manifest::load(repo_root.join(config.manifest_path()))?;
        let corpus = Corpus::load(repo_root.join(&config.docs_root), &config.corpus_options())?;
        let routes = RouteTable::build(&corpus);
        Ok(Self {
            repo_root,
            config,
            corpus,
            manifest,
            routes,
        })
    }

    pub fn context(&self) -> CheckContext<'_> {
        CheckContext {
            repo_root: &self.repo_root,
            config: &self.config,
            corpus: &self.corpus,
            manifest: &self.manifest,
            routes: &self.routes,
        }
    }
}

/// Ordered list of checks plus the run mode.
pub struct CheckEngine {
    checks: Vec<Box<dyn DocCheck>>,
    mode: RunMode,
}

impl Default for CheckEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl CheckEngine {
    /// An engine with no checks.
    pub fn new(mode: RunMode) -> Self {
        Self {
            checks: Vec::new(),
            mode,
        }
    }

    /// Every check, in publication-gate order.
    pub fn standard() -> Self {
        let mut engine = Self::new(RunMode::FailFast);
        engine.add(ManifestGithubCheck);
        engine.add(PageExistsCheck);
        engine.add(FrontmatterCheck);
        engine.add(RouteUniqueCheck);
        engine.add(LinkResolvesCheck);
        engine.add(ClickableReferenceCheck);
        engine.add(FenceConventionCheck);
        engine.add(LineWidthCheck);
        engine.add(VersionPinCheck);
        engine
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn add(&mut self, check: impl DocCheck + 'static) {
        self.checks.push(Box::new(check));
    }

    pub fn check_ids(&self) -> Vec<RuleId> {
        self.checks.iter().map(|c| c.id()).collect()
    }

    /// Run the checks in order.
    ///
    /// Environment errors abort immediately in either mode. Within one check,
    /// violations are ordered by file, then line.
    pub fn run(&self, ctx: &CheckContext<'_>) -> RuleResult<RunOutcome> {
        let mut outcome = RunOutcome::default();

        for check in &self.checks {
            debug!("Running {} ({})", check.id(), check.description());
            let mut violations = check.run(ctx)?;
            outcome.checks_run.push(check.id());

            if violations.is_empty() {
                continue;
            }
            violations.sort_by(|a, b| (&a.file, a.line).cmp(&(&b.file, b.line)));
            info!("{} found {} violation(s)", check.id(), violations.len());

            match self.mode {
                RunMode::FailFast => {
                    violations.truncate(1);
                    outcome.violations = violations;
                    return Ok(outcome);
                }
                RunMode::KeepGoing => outcome.violations.extend(violations),
            }
        }

        info!(
            "{} checks run, {} violation(s)",
            outcome.checks_run.len(),
            outcome.violations.len()
        );
        Ok(outcome)
    }
}
