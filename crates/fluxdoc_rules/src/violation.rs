//! Rule identifiers and violations.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Stable identifiers for every check, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    ManifestGithub,
    PageExists,
    Frontmatter,
    RouteUnique,
    LinkResolves,
    ClickableReference,
    FenceConvention,
    LineWidth,
    VersionPin,
}

impl RuleId {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::ManifestGithub => "manifest-github",
            RuleId::PageExists => "page-exists",
            RuleId::Frontmatter => "frontmatter",
            RuleId::RouteUnique => "route-unique",
            RuleId::LinkResolves => "link-resolves",
            RuleId::ClickableReference => "clickable-reference",
            RuleId::FenceConvention => "fence-convention",
            RuleId::LineWidth => "line-width",
            RuleId::VersionPin => "version-pin",
        }
    }
}

impl Display for RuleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected rule breach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule: RuleId,
    pub message: String,
    /// Page path relative to the docs root, or the manifest/metadata path
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Remediation hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Violation {
    pub fn new(rule: RuleId, file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
            file: file.into(),
            line: None,
            hint: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// `file` or `file:line`.
    pub fn location(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{}", self.file, line),
            None => self.file.clone(),
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.rule, self.location(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Violation {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let v = Violation::new(RuleId::LineWidth, "guides/quickstart.mdx", "too wide")
            .at_line(12)
            .with_hint("wrap it");
        assert_eq!(
            v.to_string(),
            "[line-width] guides/quickstart.mdx:12: too wide (hint: wrap it)"
        );
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let v = Violation::new(RuleId::PageExists, "mintlify-docs/docs.json", "missing");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["rule"], "page-exists");
        assert!(json.get("line").is_none());
        assert!(json.get("hint").is_none());
    }
}
