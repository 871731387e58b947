//! Frontmatter block and required field validation.

use crate::check::{CheckContext, DocCheck};
use crate::error::RuleResult;
use crate::violation::{RuleId, Violation};

const FRONTMATTER_DELIM: &str = "---";
const BOM: char = '\u{feff}';

/// Fields every page must declare as `key: "value"`.
pub const REQUIRED_FIELDS: &[&str] = &["title", "description"];

/// Why a page's frontmatter is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterIssue {
    /// The page does not open with `---`
    MissingBlock,
    /// The opening `---` is never closed
    Unterminated,
    /// The field has no line in the block
    MissingField(&'static str),
    /// The field is present but not a non-empty double-quoted string
    InvalidField(&'static str),
}

impl FrontmatterIssue {
    pub fn message(&self) -> String {
        match self {
            FrontmatterIssue::MissingBlock => {
                "page must start with a `---` frontmatter block".to_string()
            }
            FrontmatterIssue::Unterminated => {
                "frontmatter block is missing its closing `---`".to_string()
            }
            FrontmatterIssue::MissingField(key) => {
                format!("frontmatter is missing required field `{key}`")
            }
            FrontmatterIssue::InvalidField(key) => {
                format!("frontmatter field `{key}` must be a non-empty double-quoted string")
            }
        }
    }
}

/// The lines between the frontmatter delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterBlock<'a> {
    pub lines: Vec<&'a str>,
    /// 1-based line number of the closing delimiter
    pub closing_line: usize,
}

impl<'a> FrontmatterBlock<'a> {
    /// Locate the frontmatter block at the top of a page.
    pub fn parse(text: &'a str) -> Result<Self, FrontmatterIssue> {
        let text = text.strip_prefix(BOM).unwrap_or(text);
        let mut lines = text.lines();

        match lines.next() {
            Some(first) if first.trim() == FRONTMATTER_DELIM => {}
            _ => return Err(FrontmatterIssue::MissingBlock),
        }

        let mut body = Vec::new();
        for (i, line) in lines.enumerate() {
            if line.trim() == FRONTMATTER_DELIM {
                return Ok(Self {
                    lines: body,
                    closing_line: i + 2,
                });
            }
            body.push(line);
        }
        Err(FrontmatterIssue::Unterminated)
    }

    /// The raw text after `key:` on the first line declaring `key`.
    fn raw_field(&self, key: &str) -> Option<&'a str> {
        self.lines.iter().copied().find_map(|line| {
            line.trim_start()
                .strip_prefix(key)?
                .trim_start()
                .strip_prefix(':')
                .map(str::trim)
        })
    }

    /// The unquoted value of `key` if it is declared as a non-empty quoted string.
    pub fn quoted_field(&self, key: &str) -> Option<&'a str> {
        let raw = self.raw_field(key)?;
        let inner = raw.strip_prefix('"')?.strip_suffix('"')?;
        (!inner.trim().is_empty()).then_some(inner)
    }

    /// Check that every required field is present and quoted.
    pub fn validate(&self) -> Result<(), FrontmatterIssue> {
        for &key in REQUIRED_FIELDS {
            if self.quoted_field(key).is_some() {
                continue;
            }
            return Err(if self.raw_field(key).is_some() {
                FrontmatterIssue::InvalidField(key)
            } else {
                FrontmatterIssue::MissingField(key)
            });
        }
        Ok(())
    }
}

/// Validate a page's frontmatter. On failure returns the issue and the line it points at.
pub fn validate_frontmatter(text: &str) -> Result<(), (FrontmatterIssue, usize)> {
    let block = FrontmatterBlock::parse(text).map_err(|issue| (issue, 1))?;
    block.validate().map_err(|issue| (issue, block.closing_line))
}

/// Every page opens with a terminated frontmatter block declaring `title` and `description`.
pub struct FrontmatterCheck;

impl DocCheck for FrontmatterCheck {
    fn id(&self) -> RuleId {
        RuleId::Frontmatter
    }

    fn description(&self) -> &'static str {
        "pages declare quoted title and description frontmatter"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> RuleResult<Vec<Violation>> {
        let violations = ctx
            .corpus
            .documents()
            .iter()
            .filter_map(|doc| {
                let (issue, line) = validate_frontmatter(&doc.raw_text).err()?;
                Some(
                    Violation::new(RuleId::Frontmatter, doc.rel_path.clone(), issue.message())
                        .at_line(line),
                )
            })
            .collect();
        Ok(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    const VALID: &str = "---\ntitle: \"Quickstart\"\ndescription: \"Run your first script\"\n---\n\n# Quickstart\n";

    #[test]
    fn test_valid_frontmatter_passes() {
        assert_eq!(validate_frontmatter(VALID), Ok(()));
        assert_eq!(validate_frontmatter(&format!("\u{feff}{VALID}")), Ok(()));
    }

    #[test]
    fn test_removing_title_fails() {
        let text = VALID.replace("title: \"Quickstart\"\n", "");
        assert_eq!(
            validate_frontmatter(&text),
            Err((FrontmatterIssue::MissingField("title"), 3))
        );
    }

    #[test]
    fn test_removing_description_fails() {
        let text = VALID.replace("description: \"Run your first script\"\n", "");
        assert_eq!(
            validate_frontmatter(&text).unwrap_err().0,
            FrontmatterIssue::MissingField("description")
        );
    }

    #[test]
    fn test_removing_closing_delimiter_fails() {
        let text = "---\ntitle: \"Quickstart\"\ndescription: \"Run\"\n\n# Quickstart\n";
        assert_eq!(
            validate_frontmatter(text).unwrap_err().0,
            FrontmatterIssue::Unterminated
        );
    }

    #[test]
    fn test_missing_block() {
        assert_eq!(
            validate_frontmatter("# Quickstart\n").unwrap_err(),
            (FrontmatterIssue::MissingBlock, 1)
        );
        assert_eq!(
            validate_frontmatter("").unwrap_err().0,
            FrontmatterIssue::MissingBlock
        );
    }

    #[test]
    fn test_unquoted_or_empty_values_rejected() {
        let unquoted = "---\ntitle: Quickstart\ndescription: \"d\"\n---\n";
        assert_eq!(
            validate_frontmatter(unquoted).unwrap_err().0,
            FrontmatterIssue::InvalidField("title")
        );
        let empty = "---\ntitle: \"\"\ndescription: \"d\"\n---\n";
        assert_eq!(
            validate_frontmatter(empty).unwrap_err().0,
            FrontmatterIssue::InvalidField("title")
        );
    }

    #[test]
    fn test_prefixed_key_is_not_the_field() {
        let text = "---\ntitleSuffix: \"x\"\ndescription: \"d\"\n---\n";
        assert_eq!(
            validate_frontmatter(text).unwrap_err().0,
            FrontmatterIssue::MissingField("title")
        );
    }

    #[test]
    fn test_check_reports_each_broken_page() {
        let mut fixture = Fixture::new();
        fixture
            .add_doc("a.mdx", VALID)
            .add_doc("b.mdx", "# no frontmatter\n")
            .add_doc("c.mdx", "---\ntitle: \"C\"\n---\n");
        let violations = fixture.run(&FrontmatterCheck);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].file, "b.mdx");
        assert_eq!(violations[1].file, "c.mdx");
        assert!(violations[1].message.contains("description"));
    }
}
