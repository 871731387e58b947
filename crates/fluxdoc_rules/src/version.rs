//! Release version consistency between build metadata and install instructions.

use tracing::debug;

use fluxdoc_corpus::read_version;

use crate::check::{CheckContext, DocCheck};
use crate::error::RuleResult;
use crate::violation::{RuleId, Violation};

/// Pages embedding dependency coordinates must match the current release version.
pub struct VersionPinCheck;

impl DocCheck for VersionPinCheck {
    fn id(&self) -> RuleId {
        RuleId::VersionPin
    }

    fn description(&self) -> &'static str {
        "dependency snippets match the release version"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> RuleResult<Vec<Violation>> {
        let metadata_path = ctx.repo_root.join(&ctx.config.metadata);
        let Some(version) = read_version(&metadata_path)? else {
            return Ok(vec![Violation::new(
                RuleId::VersionPin,
                ctx.metadata_label(),
                "no `version=` line found in build metadata",
            )]);
        };
        debug!("Release version is {}", version);

        let mut violations = Vec::new();
        for pin in &ctx.config.version_pins {
            let expected = pin.expected(&version);
            let file = ctx.corpus.page_path(&pin.page);
            match ctx.corpus.find_page(&pin.page) {
                None => violations.push(Violation::new(
                    RuleId::VersionPin,
                    file,
                    format!("page {} must exist and contain `{expected}`", pin.page),
                )),
                Some(doc) if !doc.raw_text.contains(&expected) => violations.push(
                    Violation::new(
                        RuleId::VersionPin,
                        file,
                        format!("expected `{expected}` (version {version} from {})", ctx.metadata_label()),
                    )
                    .with_hint("update the dependency snippet to the current release"),
                ),
                Some(_) => {}
            }
        }
        Ok(violations)
    }
}
