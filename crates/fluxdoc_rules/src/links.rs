//! Internal links and cross-references between pages.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use fluxdoc_corpus::{normalize_link_target, scan_lines, Document};

use crate::check::{CheckContext, DocCheck};
use crate::error::RuleResult;
use crate::violation::{RuleId, Violation};

static MARKDOWN_LINK_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\]\((/[^)\s]*)(?:\s+"[^"]*")?\)"#).expect("valid link regex")
});
static HREF_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bhref\s*=\s*(?:"(/[^"]*)"|'(/[^']*)')"#).expect("valid href regex")
});
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("valid inline code regex"));
static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\[[^\]]*\]\([^)]*\)").expect("valid link span regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// Characters that make a route-shaped token part of a larger word or URL.
const ROUTE_GLUE: &[char] = &['/', '.', ':', '-', '_'];

/// No two pages may serve the same public route.
pub struct RouteUniqueCheck;

impl DocCheck for RouteUniqueCheck {
    fn id(&self) -> RuleId {
        RuleId::RouteUnique
    }

    fn description(&self) -> &'static str {
        "every page maps to a distinct route"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> RuleResult<Vec<Violation>> {
        Ok(ctx
            .routes
            .collisions()
            .iter()
            .map(|c| {
                Violation::new(
                    RuleId::RouteUnique,
                    c.second.clone(),
                    format!("route {} is already served by {}", c.route, c.first),
                )
                .with_hint("rename or remove one of the pages")
            })
            .collect())
    }
}

/// Absolute page links found on one line. Link syntax inside inline code is not a link.
pub fn absolute_link_targets(line: &str) -> Vec<String> {
    let line = INLINE_CODE.replace_all(line, " ");
    let markdown = MARKDOWN_LINK_TARGET
        .captures_iter(&line)
        .filter_map(|caps| caps.get(1));
    let hrefs = HREF_TARGET
        .captures_iter(&line)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)));
    markdown
        .chain(hrefs)
        .map(|m| m.as_str())
        .filter(|target| !target.starts_with("//"))
        .map(str::to_string)
        .collect()
}

/// Every absolute internal link points at a route some page serves.
pub struct LinkResolvesCheck;

impl LinkResolvesCheck {
    fn check_document(&self, ctx: &CheckContext<'_>, doc: &Document, out: &mut Vec<Violation>) {
        for line in scan_lines(&doc.raw_text) {
            if !line.kind.is_body_text() {
                continue;
            }
            for target in absolute_link_targets(line.text) {
                if ctx
                    .config
                    .asset_prefixes
                    .iter()
                    .any(|prefix| target.starts_with(prefix.as_str()))
                {
                    continue;
                }
                let route = normalize_link_target(&target);
                if ctx.routes.contains(&route) {
                    continue;
                }
                out.push(
                    Violation::new(
                        RuleId::LinkResolves,
                        doc.rel_path.clone(),
                        format!("link target {target} does not resolve to any page (route {route})"),
                    )
                    .at_line(line.number)
                    .with_hint(format!(
                        "point the link at an existing page or add {}",
                        ctx.corpus.page_path(&route)
                    )),
                );
            }
        }
    }
}

impl DocCheck for LinkResolvesCheck {
    fn id(&self) -> RuleId {
        RuleId::LinkResolves
    }

    fn description(&self) -> &'static str {
        "internal links resolve to existing routes"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> RuleResult<Vec<Violation>> {
        let mut violations = Vec::new();
        for doc in ctx.corpus.documents() {
            self.check_document(ctx, doc, &mut violations);
        }
        Ok(violations)
    }
}

/// Build the matcher for bare route tokens under the given section prefixes.
pub fn bare_route_regex(prefixes: &[String]) -> Option<Regex> {
    if prefixes.is_empty() {
        return None;
    }
    let alternatives = prefixes
        .iter()
        .map(|p| regex::escape(p.trim_matches('/')))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"/?(?:{alternatives})(?:/[A-Za-z0-9_.\-]+)+")).ok()
}

/// Route-shaped tokens on a prose line that are not inside link syntax, inline code or tags.
pub fn bare_routes(line: &str, matcher: &Regex) -> Vec<String> {
    let stripped = MARKDOWN_LINK.replace_all(line, " ");
    let stripped = INLINE_CODE.replace_all(&stripped, " ");
    let stripped = TAG.replace_all(&stripped, " ");

    matcher
        .find_iter(&stripped)
        .filter(|m| {
            let glued = stripped[..m.start()]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || ROUTE_GLUE.contains(&c));
            !glued
        })
        .map(|m| m.as_str().trim_end_matches('.').to_string())
        .collect()
}

/// Cross-references to other pages must be clickable links.
///
/// Flags inline code naming a multi-segment page (`` `runtime/jsr223` ``) and bare
/// route-shaped paths written as plain prose.
pub struct ClickableReferenceCheck;

impl DocCheck for ClickableReferenceCheck {
    fn id(&self) -> RuleId {
        RuleId::ClickableReference
    }

    fn description(&self) -> &'static str {
        "page cross-references are links, not code or bare paths"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> RuleResult<Vec<Violation>> {
        let page_refs: HashSet<&str> = ctx
            .manifest
            .page_refs()
            .into_iter()
            .map(|page| page.trim_start_matches('/'))
            .filter(|page| page.contains('/'))
            .collect();
        let matcher = bare_route_regex(&ctx.config.route_prefixes);
        debug!(
            "Checking clickability against {} multi-segment pages",
            page_refs.len()
        );

        let mut violations = Vec::new();
        for doc in ctx.corpus.documents() {
            for line in scan_lines(&doc.raw_text) {
                if !line.kind.is_body_text() {
                    continue;
                }

                // Code spans used as link labels are already clickable
                let unlinked = MARKDOWN_LINK.replace_all(line.text, " ");
                for caps in INLINE_CODE.captures_iter(&unlinked) {
                    let code = &caps[1];
                    if page_refs.contains(code) {
                        violations.push(
                            Violation::new(
                                RuleId::ClickableReference,
                                doc.rel_path.clone(),
                                format!("inline code `{code}` names a page but is not clickable"),
                            )
                            .at_line(line.number)
                            .with_hint(format!("write it as a link: [{code}](/{code})")),
                        );
                    }
                }

                let Some(matcher) = matcher.as_ref() else {
                    continue;
                };
                if !line.kind.is_prose() {
                    continue;
                }
                for route in bare_routes(line.text, matcher) {
                    let target = format!("/{}", route.trim_start_matches('/'));
                    violations.push(
                        Violation::new(
                            RuleId::ClickableReference,
                            doc.rel_path.clone(),
                            format!("bare path {route} looks like a page route but is not a link"),
                        )
                        .at_line(line.number)
                        .with_hint(format!("write it as a link: [{route}]({target})")),
                    );
                }
            }
        }
        Ok(violations)
    }
}
