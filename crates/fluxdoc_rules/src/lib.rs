//! # fluxdoc_rules
//!
//! Documentation integrity rules and the check engine that gates publication.
//!
//! This crate provides:
//! - **Configuration**: defaults, `fluxdoc.toml` and width-threshold environment overrides
//! - **Checks**: manifest, page existence, frontmatter, links, clickability, style, versions
//! - **Engine**: fixed-order execution with fail-fast or keep-going reporting
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use fluxdoc_rules::{CheckEngine, DocsConfig, DocsWorkspace, RunMode};
//!
//! let mut config = DocsConfig::discover(Path::new("."), None)?;
//! config.apply_env()?;
//!
//! let workspace = DocsWorkspace::load(".", config)?;
//! let outcome = CheckEngine::standard()
//!     .with_mode(RunMode::FailFast)
//!     .run(&workspace.context())?;
//!
//! match outcome.first() {
//!     None => println!("OK"),
//!     Some(violation) => eprintln!("{violation}"),
//! }
//! # Ok::<(), fluxdoc_rules::RuleError>(())
//! ```

pub mod check;
pub mod config;
pub mod engine;
pub mod error;
pub mod frontmatter;
pub mod links;
pub mod navigation;
pub mod style;
pub mod version;
pub mod violation;
pub mod width;

#[cfg(test)]
pub(crate) mod testing;

pub use check::{CheckContext, DocCheck};
pub use config::{
    DocsConfig, EnvSource, ForbiddenFence, VersionPin, CONFIG_FILE_NAME, MAX_WIDTH_ENV,
    MAX_WIDTH_ENV_DEPRECATED,
};
pub use engine::{CheckEngine, DocsWorkspace, RunMode, RunOutcome};
pub use error::{ConfigError, ConfigResult, RuleError, RuleResult};
pub use frontmatter::{validate_frontmatter, FrontmatterIssue, REQUIRED_FIELDS};
pub use violation::{RuleId, Violation};
pub use width::{display_width, suggest_wrap, visible_text, visible_width, wrap_inline};
