//! Build metadata (`gradle.properties`) reading.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{CorpusError, CorpusResult};

static VERSION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*version\s*=\s*(.+)$").expect("valid version regex"));

/// Extract the first `version=<value>` assignment from build metadata text.
pub fn parse_version(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| VERSION_LINE.captures(line))
        .map(|caps| caps[1].trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read the release version from a build metadata file.
///
/// Returns `Ok(None)` when the file exists but has no `version=` line.
pub fn read_version(path: impl AsRef<Path>) -> CorpusResult<Option<String>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(CorpusError::MetadataNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|e| CorpusError::read(path, e))?;
    let version = parse_version(&content);
    debug!("Build metadata {:?} declares version {:?}", path, version);
    Ok(version)
}
