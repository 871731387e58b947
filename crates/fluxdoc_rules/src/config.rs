//! Checker configuration.
//!
//! Settings are layered: built-in defaults, then an optional `fluxdoc.toml`, then the
//! width-threshold environment overrides, then CLI flags (applied by the caller).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use fluxdoc_corpus::CorpusOptions;

use crate::error::{ConfigError, ConfigResult};

/// Config file looked up at the repository root when none is given explicitly.
pub const CONFIG_FILE_NAME: &str = "fluxdoc.toml";

/// Canonical environment override for the visible line width threshold.
pub const MAX_WIDTH_ENV: &str = "FLUXON_DOCS_MAX_VISIBLE_LINE_WIDTH";

/// Deprecated alias of [`MAX_WIDTH_ENV`].
pub const MAX_WIDTH_ENV_DEPRECATED: &str = "FLUXON_DOCS_MAX_LINE_WIDTH";

pub const DEFAULT_MAX_VISIBLE_WIDTH: i64 = 120;

/// One candidate source for an integer override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvSource {
    pub name: &'static str,
    pub deprecated: bool,
}

/// Width override sources, highest priority first.
pub const MAX_WIDTH_SOURCES: &[EnvSource] = &[
    EnvSource {
        name: MAX_WIDTH_ENV,
        deprecated: false,
    },
    EnvSource {
        name: MAX_WIDTH_ENV_DEPRECATED,
        deprecated: true,
    },
];

/// A code-fence opener that must not appear in any page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForbiddenFence {
    pub pattern: String,
    pub hint: String,
}

/// A dependency coordinate a page must embed for the current release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionPin {
    /// Page reference, e.g. `guides/quickstart`
    pub page: String,
    /// Coordinate template; `{version}` is replaced with the release version
    pub coordinate: String,
}

impl VersionPin {
    pub fn new(page: impl Into<String>, coordinate: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            coordinate: coordinate.into(),
        }
    }

    /// The exact substring expected for `version`.
    pub fn expected(&self, version: &str) -> String {
        self.coordinate.replace("{version}", version)
    }
}

/// Full checker configuration. Paths are relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    pub docs_root: PathBuf,
    /// Navigation manifest; defaults to `<docs_root>/docs.json`
    pub manifest: Option<PathBuf>,
    /// Build metadata file declaring `version=`
    pub metadata: PathBuf,
    pub extension: String,
    pub ignore_dirs: Vec<String>,
    pub exclude: Vec<String>,
    pub canonical_github: String,
    /// `<= 0` disables the width check
    pub max_visible_width: i64,
    /// Top-level sections whose bare paths must be written as links
    pub route_prefixes: Vec<String>,
    /// Link targets that are assets rather than pages
    pub asset_prefixes: Vec<String>,
    pub forbidden_fences: Vec<ForbiddenFence>,
    pub version_pins: Vec<VersionPin>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        let corpus = CorpusOptions::default();
        Self {
            docs_root: PathBuf::from("mintlify-docs"),
            manifest: None,
            metadata: PathBuf::from("gradle.properties"),
            extension: corpus.extension,
            ignore_dirs: corpus.ignore_dirs,
            exclude: corpus.exclude,
            canonical_github: "https://github.com/TabooLib/fluxon".to_string(),
            max_visible_width: DEFAULT_MAX_VISIBLE_WIDTH,
            route_prefixes: vec![
                "guides".to_string(),
                "language".to_string(),
                "runtime".to_string(),
                "reference".to_string(),
            ],
            asset_prefixes: vec![
                "/favicon".to_string(),
                "/images/".to_string(),
                "/logo/".to_string(),
            ],
            forbidden_fences: vec![ForbiddenFence {
                pattern: "```text title=".to_string(),
                hint: "titled `text` fences render as an empty tab; drop the title or use a real language tag"
                    .to_string(),
            }],
            version_pins: vec![
                VersionPin::new(
                    "guides/quickstart",
                    "org.tabooproject.fluxon:fluxon-core:{version}",
                ),
                VersionPin::new(
                    "guides/quickstart",
                    "org.tabooproject.fluxon:fluxon-jsr223:{version}",
                ),
                VersionPin::new(
                    "runtime/jsr223",
                    "org.tabooproject.fluxon:fluxon-jsr223:{version}",
                ),
            ],
        }
    }
}

impl DocsConfig {
    /// Parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        debug!("Reading config from {:?}", path);
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load `explicit` if given, else `<repo_root>/fluxdoc.toml` if present, else defaults.
    pub fn discover(repo_root: &Path, explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = repo_root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            info!("Using config {:?}", candidate);
            return Self::load(candidate);
        }
        debug!("No {} found, using defaults", CONFIG_FILE_NAME);
        Ok(Self::default())
    }

    /// Apply width overrides from the process environment.
    pub fn apply_env(&mut self) -> ConfigResult<()> {
        self.apply_env_with(|name| {
            std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
        })
    }

    /// Apply width overrides using `lookup` to read variables.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(width) = resolve_integer_override(MAX_WIDTH_SOURCES, lookup)? {
            self.max_visible_width = width;
        }
        Ok(())
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.manifest
            .clone()
            .unwrap_or_else(|| self.docs_root.join("docs.json"))
    }

    pub fn corpus_options(&self) -> CorpusOptions {
        CorpusOptions {
            extension: self.extension.clone(),
            ignore_dirs: self.ignore_dirs.clone(),
            exclude: self.exclude.clone(),
        }
    }

    /// The width threshold, or `None` when the check is disabled.
    pub fn width_limit(&self) -> Option<usize> {
        usize::try_from(self.max_visible_width)
            .ok()
            .filter(|&w| w > 0)
    }
}

/// Resolve an integer override from ordered candidate sources.
///
/// Every present source must parse as an integer; the first present one wins.
pub fn resolve_integer_override<F>(sources: &[EnvSource], lookup: F) -> ConfigResult<Option<i64>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut resolved = None;
    for source in sources {
        let Some(raw) = lookup(source.name) else {
            continue;
        };
        let value = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| ConfigError::InvalidInteger {
                source_name: source.name.to_string(),
                value: raw.clone(),
            })?;

        if resolved.is_some() {
            continue;
        }
        if source.deprecated {
            warn!(
                "{} is deprecated, use {} instead",
                source.name, sources[0].name
            );
        }
        resolved = Some(value);
    }
    Ok(resolved)
}
