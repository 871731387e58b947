//! Error types for corpus loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for corpus operations.
pub type CorpusResult<T> = Result<T, CorpusError>;

/// Errors that can occur while loading documents, the manifest or build metadata.
///
/// These are environment errors: a required input is absent or unreadable. Rule
/// breaches found in well-formed inputs are reported as violations by `fluxdoc_rules`.
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Docs root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Navigation manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    #[error("Build metadata file not found: {0}")]
    MetadataNotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk docs tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("JSON parsing error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("YAML parsing error in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl CorpusError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
