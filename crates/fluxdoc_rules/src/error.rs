//! Error types for the rules module.

use std::path::PathBuf;

use fluxdoc_corpus::CorpusError;
use thiserror::Error;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for check execution.
pub type RuleResult<T> = Result<T, RuleError>;

/// Invalid or unreadable configuration. Raised before any page is loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{source_name} must be an integer, got '{value}'")]
    InvalidInteger { source_name: String, value: String },

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parsing error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors that abort a run outright. Rule breaches are reported as
/// [`Violation`](crate::violation::Violation)s instead.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
