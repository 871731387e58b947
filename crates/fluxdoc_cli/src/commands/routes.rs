//! Routes command - Print the route table.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use tracing::warn;

use fluxdoc_corpus::{Corpus, RouteTable};

use super::load_config;

#[derive(Args)]
pub struct RoutesArgs {
    /// Docs root relative to the repository root
    #[arg(long)]
    docs_root: Option<PathBuf>,
}

pub fn execute(root: &Path, config_path: Option<&Path>, args: RoutesArgs) -> Result<()> {
    let mut config = load_config(root, config_path)?;
    if let Some(docs_root) = args.docs_root {
        config.docs_root = docs_root;
    }

    let corpus = Corpus::load(root.join(&config.docs_root), &config.corpus_options())?;
    let routes = RouteTable::build(&corpus);

    for (route, file) in routes.iter() {
        println!("{}\t{}", route, file);
    }
    for collision in routes.collisions() {
        warn!(
            "{} also maps to {} (served by {})",
            collision.second, collision.route, collision.first
        );
    }
    Ok(())
}
