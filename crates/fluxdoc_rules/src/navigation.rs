//! Manifest integrity: global fields and declared pages.

use tracing::debug;

use crate::check::{CheckContext, DocCheck};
use crate::error::RuleResult;
use crate::violation::{RuleId, Violation};

/// `footer.socials.github` must point at the canonical repository.
pub struct ManifestGithubCheck;

impl DocCheck for ManifestGithubCheck {
    fn id(&self) -> RuleId {
        RuleId::ManifestGithub
    }

    fn description(&self) -> &'static str {
        "manifest footer links to the canonical GitHub repository"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> RuleResult<Vec<Violation>> {
        let expected = ctx.config.canonical_github.as_str();
        let violation = match ctx.manifest.github() {
            Some(actual) if actual == expected => None,
            Some(actual) => Some(Violation::new(
                RuleId::ManifestGithub,
                ctx.manifest_label(),
                format!("footer.socials.github must be \"{expected}\", found \"{actual}\""),
            )),
            None => Some(Violation::new(
                RuleId::ManifestGithub,
                ctx.manifest_label(),
                format!("footer.socials.github is missing, expected \"{expected}\""),
            )),
        };
        Ok(violation.into_iter().collect())
    }
}

/// Every page the manifest declares must exist on disk.
///
/// All missing pages are reported together in a single violation.
pub struct PageExistsCheck;

impl DocCheck for PageExistsCheck {
    fn id(&self) -> RuleId {
        RuleId::PageExists
    }

    fn description(&self) -> &'static str {
        "every navigation page has a backing file"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> RuleResult<Vec<Violation>> {
        let declared = ctx.manifest.page_refs();
        debug!("Manifest declares {} pages", declared.len());

        let missing: Vec<&str> = declared
            .into_iter()
            .filter(|page| ctx.corpus.find_page(page).is_none())
            .collect();

        if missing.is_empty() {
            return Ok(Vec::new());
        }

        let expected_files = missing
            .iter()
            .map(|page| ctx.corpus.page_path(page))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(vec![Violation::new(
            RuleId::PageExists,
            ctx.manifest_label(),
            format!(
                "{} navigation page(s) have no file: {}",
                missing.len(),
                missing.join(", ")
            ),
        )
        .with_hint(format!(
            "create {expected_files} under {} or remove the entries from the manifest",
            ctx.config.docs_root.display()
        ))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    #[test]
    fn test_github_mismatch_names_both_values() {
        let mut fixture = Fixture::new();
        fixture.github = Some("https://github.com/someone/fork".to_string());
        let violations = fixture.run(&ManifestGithubCheck);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("https://github.com/TabooLib/fluxon"));
        assert!(violations[0].message.contains("https://github.com/someone/fork"));
    }

    #[test]
    fn test_github_missing() {
        let mut fixture = Fixture::new();
        fixture.github = None;
        let violations = fixture.run(&ManifestGithubCheck);
        assert!(violations[0].message.contains("missing"));
    }

    #[test]
    fn test_missing_pages_aggregated() {
        let mut fixture = Fixture::new();
        fixture.pages = vec![
            "guides/quickstart".to_string(),
            "guides/install".to_string(),
            "runtime/threads".to_string(),
        ];
        fixture.add_doc("guides/install.mdx", "");
        let violations = fixture.run(&PageExistsCheck);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("guides/quickstart, runtime/threads"));
        assert!(!violations[0].message.contains("guides/install"));
        assert_eq!(violations[0].file, "mintlify-docs/docs.json");
    }
}
