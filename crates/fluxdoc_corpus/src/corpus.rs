//! Document corpus loading.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::error::{CorpusError, CorpusResult};
use crate::routes::route_for;

/// A single documentation page read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Absolute (or root-joined) path on disk
    pub path: PathBuf,
    /// Path relative to the docs root, always `/`-separated
    pub rel_path: String,
    /// Public route the page is served at
    pub route: String,
    /// File content as read
    pub raw_text: String,
}

impl Document {
    /// Build a document from its relative path and content, deriving its route.
    pub fn new(
        path: impl Into<PathBuf>,
        rel_path: impl Into<String>,
        raw_text: impl Into<String>,
        extension: &str,
    ) -> Self {
        let rel_path = rel_path.into();
        let route = route_for(&rel_path, extension);
        Self {
            path: path.into(),
            rel_path,
            route,
            raw_text: raw_text.into(),
        }
    }

    /// Iterate lines with 1-based line numbers.
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.raw_text.lines().enumerate().map(|(i, line)| (i + 1, line))
    }
}

/// Options controlling which files are part of the corpus.
#[derive(Debug, Clone)]
pub struct CorpusOptions {
    /// Page file extension, without the dot
    pub extension: String,
    /// Directory names pruned anywhere in the tree
    pub ignore_dirs: Vec<String>,
    /// Glob patterns matched against the relative path
    pub exclude: Vec<String>,
}

impl Default for CorpusOptions {
    fn default() -> Self {
        Self {
            extension: "mdx".to_string(),
            ignore_dirs: vec![".mintlify".to_string(), "node_modules".to_string()],
            exclude: Vec::new(),
        }
    }
}

/// All pages under a docs root, sorted by relative path.
#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
    extension: String,
    documents: Vec<Document>,
}

impl Corpus {
    /// Build a corpus from already-loaded documents.
    pub fn from_documents(
        root: impl Into<PathBuf>,
        extension: impl Into<String>,
        mut documents: Vec<Document>,
    ) -> Self {
        documents.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        Self {
            root: root.into(),
            extension: extension.into(),
            documents,
        }
    }

    /// Load every page under `root`.
    pub fn load(root: impl AsRef<Path>, options: &CorpusOptions) -> CorpusResult<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(CorpusError::RootNotFound(root.to_path_buf()));
        }

        let excludes = options
            .exclude
            .iter()
            .map(|p| {
                glob::Pattern::new(p).map_err(|e| CorpusError::InvalidPattern {
                    pattern: p.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<CorpusResult<Vec<_>>>()?;

        info!("Loading docs corpus from {:?}", root);

        let mut documents = Vec::new();
        let walker = WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_ignored_dir(e, &options.ignore_dirs));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != options.extension.as_str()) {
                continue;
            }

            let rel_path = relative_slash_path(root, path);
            if excludes.iter().any(|pat| pat.matches(&rel_path)) {
                debug!("Excluded by pattern: {}", rel_path);
                continue;
            }

            let raw_text = fs::read_to_string(path).map_err(|e| CorpusError::read(path, e))?;
            debug!("Loaded {} ({} bytes)", rel_path, raw_text.len());
            documents.push(Document::new(path, rel_path, raw_text, &options.extension));
        }

        info!("Loaded {} pages", documents.len());
        Ok(Self::from_documents(root, options.extension.clone(), documents))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Look up a document by its relative path.
    pub fn get(&self, rel_path: &str) -> Option<&Document> {
        self.documents
            .binary_search_by(|d| d.rel_path.as_str().cmp(rel_path))
            .ok()
            .map(|i| &self.documents[i])
    }

    /// The relative file path a page reference is expected at.
    pub fn page_path(&self, page_ref: &str) -> String {
        format!("{}.{}", page_ref.trim_start_matches('/'), self.extension)
    }

    /// Find the document backing a manifest page reference.
    pub fn find_page(&self, page_ref: &str) -> Option<&Document> {
        self.get(&self.page_path(page_ref))
    }
}

fn is_ignored_dir(entry: &DirEntry, ignore_dirs: &[String]) -> bool {
    entry.file_type().is_dir()
        && ignore_dirs
            .iter()
            .any(|name| entry.file_name().to_string_lossy() == name.as_str())
}

fn relative_slash_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
