//! Public route derivation and the route table.

use std::collections::BTreeMap;

use tracing::debug;

use crate::corpus::Corpus;

const INDEX_PAGE: &str = "index";

/// Compute the public route for a page's relative path.
///
/// `index.mdx` becomes `/`, `guides/index.mdx` becomes `/guides` and every other
/// page keeps its path without the extension.
pub fn route_for(rel_path: &str, extension: &str) -> String {
    let suffix = format!(".{extension}");
    let stem = rel_path.strip_suffix(suffix.as_str()).unwrap_or(rel_path);
    let stem = stem.trim_matches('/');

    if stem == INDEX_PAGE {
        return "/".to_string();
    }
    match stem.strip_suffix(INDEX_PAGE) {
        Some(parent) if parent.ends_with('/') => format!("/{}", parent.trim_end_matches('/')),
        _ => format!("/{stem}"),
    }
}

/// Normalize a link target into route form.
///
/// Drops any fragment or query string and a trailing slash (except for the root).
pub fn normalize_link_target(target: &str) -> String {
    let end = target.find(['#', '?']).unwrap_or(target.len());
    let path = &target[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Two pages that collapse onto the same public route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCollision {
    pub route: String,
    pub first: String,
    pub second: String,
}

/// Mapping from public route to the relative path of the page serving it.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: BTreeMap<String, String>,
    collisions: Vec<RouteCollision>,
}

impl RouteTable {
    /// Build the table for every document in the corpus.
    ///
    /// The first document (in path order) keeps a contested route; later ones are
    /// recorded as collisions.
    pub fn build(corpus: &Corpus) -> Self {
        let mut table = Self::default();
        for doc in corpus.documents() {
            if let Some(existing) = table.routes.get(&doc.route) {
                table.collisions.push(RouteCollision {
                    route: doc.route.clone(),
                    first: existing.clone(),
                    second: doc.rel_path.clone(),
                });
                continue;
            }
            table.routes.insert(doc.route.clone(), doc.rel_path.clone());
        }
        debug!(
            "Built route table with {} routes ({} collisions)",
            table.routes.len(),
            table.collisions.len()
        );
        table
    }

    pub fn contains(&self, route: &str) -> bool {
        self.routes.contains_key(route)
    }

    /// Relative path of the page serving `route`.
    pub fn resolve(&self, route: &str) -> Option<&str> {
        self.routes.get(route).map(String::as_str)
    }

    pub fn collisions(&self) -> &[RouteCollision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterate `(route, rel_path)` pairs in route order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.routes.iter().map(|(r, p)| (r.as_str(), p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Document;

    #[test]
    fn test_route_for() {
        assert_eq!(route_for("index.mdx", "mdx"), "/");
        assert_eq!(route_for("guides/index.mdx", "mdx"), "/guides");
        assert_eq!(route_for("guides/quickstart.mdx", "mdx"), "/guides/quickstart");
        assert_eq!(route_for("runtime/reindex.mdx", "mdx"), "/runtime/reindex");
    }

    #[test]
    fn test_normalize_link_target() {
        assert_eq!(normalize_link_target("/guides/quickstart#install"), "/guides/quickstart");
        assert_eq!(normalize_link_target("/guides/"), "/guides");
        assert_eq!(normalize_link_target("/"), "/");
        assert_eq!(normalize_link_target("/#top"), "/");
        assert_eq!(normalize_link_target("/runtime?tab=java"), "/runtime");
    }

    #[test]
    fn test_collision_recorded() {
        let corpus = Corpus::from_documents(
            "/docs",
            "mdx",
            vec![
                Document::new("/docs/guides.mdx", "guides.mdx", "", "mdx"),
                Document::new("/docs/guides/index.mdx", "guides/index.mdx", "", "mdx"),
            ],
        );
        let table = RouteTable::build(&corpus);
        assert_eq!(table.len(), 1);
        assert_eq!(table.collisions().len(), 1);
        assert_eq!(table.collisions()[0].route, "/guides");
    }
}
