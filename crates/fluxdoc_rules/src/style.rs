//! Code-fence conventions and visible line width.

use tracing::debug;

use fluxdoc_corpus::scan_lines;

use crate::check::{CheckContext, DocCheck};
use crate::error::RuleResult;
use crate::violation::{RuleId, Violation};
use crate::width::{display_width, suggest_wrap, visible_text};

/// Configured fence openers must not appear anywhere in a page.
pub struct FenceConventionCheck;

impl DocCheck for FenceConventionCheck {
    fn id(&self) -> RuleId {
        RuleId::FenceConvention
    }

    fn description(&self) -> &'static str {
        "code fences follow the language/title conventions"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> RuleResult<Vec<Violation>> {
        let mut violations = Vec::new();
        for doc in ctx.corpus.documents() {
            for (number, line) in doc.numbered_lines() {
                for fence in &ctx.config.forbidden_fences {
                    if !line.contains(fence.pattern.as_str()) {
                        continue;
                    }
                    violations.push(
                        Violation::new(
                            RuleId::FenceConvention,
                            doc.rel_path.clone(),
                            format!("forbidden code fence `{}`", fence.pattern),
                        )
                        .at_line(number)
                        .with_hint(fence.hint.clone()),
                    );
                }
            }
        }
        Ok(violations)
    }
}

/// Prose lines must fit the visible width limit.
///
/// Frontmatter, code fences and table rows are exempt. A limit of zero or less
/// turns the check off.
pub struct LineWidthCheck;

impl DocCheck for LineWidthCheck {
    fn id(&self) -> RuleId {
        RuleId::LineWidth
    }

    fn description(&self) -> &'static str {
        "prose lines fit the visible width limit"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> RuleResult<Vec<Violation>> {
        let Some(limit) = ctx.config.width_limit() else {
            debug!("Line width check disabled");
            return Ok(Vec::new());
        };

        let mut violations = Vec::new();
        for doc in ctx.corpus.documents() {
            for line in scan_lines(&doc.raw_text) {
                if !line.kind.is_prose() {
                    continue;
                }
                let visible = visible_text(line.text);
                let width = display_width(&visible);
                if width <= limit {
                    continue;
                }

                let suggestion = suggest_wrap(line.text, limit)
                    .into_iter()
                    .map(|l| format!("    {l}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                violations.push(
                    Violation::new(
                        RuleId::LineWidth,
                        doc.rel_path.clone(),
                        format!("visible width {width} > {limit}: {visible}"),
                    )
                    .at_line(line.number)
                    .with_hint(format!(
                        "split the line at a space or punctuation mark, e.g.\n{suggestion}"
                    )),
                );
            }
        }
        Ok(violations)
    }
}
