//! Navigation manifest (`docs.json`) reading.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CorpusError, CorpusResult};

/// The parts of the navigation manifest the checks care about.
///
/// Unknown fields (theme, colors, logo, ...) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub navigation: Navigation,
    #[serde(default)]
    pub footer: Footer,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Navigation {
    #[serde(default)]
    pub tabs: Vec<Tab>,
}

/// A top-level navigation tab.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tab {
    #[serde(default)]
    pub tab: String,
    #[serde(default)]
    pub groups: Vec<Group>,
}

/// A sidebar group; groups may nest inside a group's page list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub pages: Vec<PageEntry>,
}

/// One entry of a group's `pages` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageEntry {
    Ref(String),
    Group(Group),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Footer {
    #[serde(default)]
    pub socials: BTreeMap<String, String>,
}

impl Manifest {
    /// Read a manifest file. `.yaml`/`.yml` files are parsed as YAML, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> CorpusResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(CorpusError::ManifestNotFound(path.to_path_buf()));
        }
        debug!("Reading navigation manifest from {:?}", path);

        let content = fs::read_to_string(path).map_err(|e| CorpusError::read(path, e))?;
        let is_yaml = path
            .extension()
            .map_or(false, |ext| ext == "yaml" || ext == "yml");

        if is_yaml {
            serde_yaml::from_str(&content).map_err(|source| CorpusError::Yaml {
                path: path.to_path_buf(),
                source,
            })
        } else {
            serde_json::from_str(&content).map_err(|source| CorpusError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    /// The `footer.socials.github` value, if present.
    pub fn github(&self) -> Option<&str> {
        self.footer.socials.get("github").map(String::as_str)
    }

    /// All declared page references in navigation order, without duplicates.
    pub fn page_refs(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        for tab in &self.navigation.tabs {
            for group in &tab.groups {
                collect_refs(group, &mut refs);
            }
        }
        refs
    }
}

fn collect_refs<'a>(group: &'a Group, refs: &mut Vec<&'a str>) {
    for entry in &group.pages {
        match entry {
            PageEntry::Ref(page) => {
                if !refs.contains(&page.as_str()) {
                    refs.push(page.as_str());
                }
            }
            PageEntry::Group(nested) => collect_refs(nested, refs),
        }
    }
}
