//! # fluxdoc_corpus
//!
//! Loading side of the Fluxon documentation checker.
//!
//! This crate reads everything the checks run over and nothing else:
//!
//! - **Corpus**: every `.mdx` page under the docs root, sorted by path
//! - **Manifest**: the `docs.json` navigation tree, flattened to page references
//! - **Routes**: the public route of every page, with index collapsing
//! - **Metadata**: the release version declared in `gradle.properties`
//! - **Scan**: the per-line frontmatter/fence/table classifier shared by the checks
//!
//! ## Example
//!
//! ```rust,no_run
//! use fluxdoc_corpus::{Corpus, CorpusOptions, Manifest, RouteTable};
//!
//! let corpus = Corpus::load("mintlify-docs", &CorpusOptions::default()).unwrap();
//! let manifest = Manifest::load("mintlify-docs/docs.json").unwrap();
//! let routes = RouteTable::build(&corpus);
//!
//! for page in manifest.page_refs() {
//!     if corpus.find_page(page).is_none() {
//!         eprintln!("missing page: {}", page);
//!     }
//! }
//! println!("{} routes", routes.len());
//! ```

pub mod corpus;
pub mod error;
pub mod manifest;
pub mod metadata;
pub mod routes;
pub mod scan;

pub use corpus::{Corpus, CorpusOptions, Document};
pub use error::{CorpusError, CorpusResult};
pub use manifest::{Footer, Group, Manifest, Navigation, PageEntry, Tab};
pub use metadata::{parse_version, read_version};
pub use routes::{normalize_link_target, route_for, RouteCollision, RouteTable};
pub use scan::{scan_lines, LineKind, LineScanner, ScanState, ScannedLine};
