//! In-memory fixtures for check unit tests.

use std::path::PathBuf;

use fluxdoc_corpus::{Corpus, Document, Footer, Group, Manifest, Navigation, PageEntry, RouteTable, Tab};

use crate::check::{CheckContext, DocCheck};
use crate::config::DocsConfig;
use crate::violation::Violation;

pub(crate) struct Fixture {
    pub config: DocsConfig,
    pub repo_root: PathBuf,
    pub docs: Vec<(String, String)>,
    pub pages: Vec<String>,
    pub github: Option<String>,
}

impl Fixture {
    pub fn new() -> Self {
        let config = DocsConfig::default();
        let github = Some(config.canonical_github.clone());
        Self {
            config,
            repo_root: PathBuf::from("/repo"),
            docs: Vec::new(),
            pages: Vec::new(),
            github,
        }
    }

    pub fn add_doc(&mut self, rel_path: &str, text: &str) -> &mut Self {
        self.docs.push((rel_path.to_string(), text.to_string()));
        self
    }

    pub fn corpus(&self) -> Corpus {
        let root = self.repo_root.join(&self.config.docs_root);
        let documents = self
            .docs
            .iter()
            .map(|(rel, text)| Document::new(root.join(rel), rel.clone(), text.clone(), &self.config.extension))
            .collect();
        Corpus::from_documents(root, self.config.extension.clone(), documents)
    }

    pub fn manifest(&self) -> Manifest {
        let mut footer = Footer::default();
        if let Some(github) = &self.github {
            footer.socials.insert("github".to_string(), github.clone());
        }
        Manifest {
            navigation: Navigation {
                tabs: vec![Tab {
                    tab: "Docs".to_string(),
                    groups: vec![Group {
                        group: "Pages".to_string(),
                        pages: self.pages.iter().cloned().map(PageEntry::Ref).collect(),
                    }],
                }],
            },
            footer,
        }
    }

    pub fn run(&self, check: &dyn DocCheck) -> Vec<Violation> {
        let corpus = self.corpus();
        let manifest = self.manifest();
        let routes = RouteTable::build(&corpus);
        let ctx = CheckContext {
            repo_root: &self.repo_root,
            config: &self.config,
            corpus: &corpus,
            manifest: &manifest,
            routes: &routes,
        };
        check.run(&ctx).expect("check runs")
    }
}
