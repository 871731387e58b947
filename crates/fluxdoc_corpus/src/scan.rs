//! Per-line Markdown classification.
//!
//! Style and reference checks only look at prose, so every line of a page is first
//! run through a small automaton that tracks the frontmatter block and code fences.
//! The automaton is reset per file.

const FRONTMATTER_DELIM: &str = "---";
const FENCE_MARKER: &str = "```";
const BOM: char = '\u{feff}';

/// Where the scanner is within a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    BeforeFrontmatter,
    InFrontmatter,
    Body,
    InFence,
}

/// Classification of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A frontmatter delimiter or a line inside the frontmatter block
    Frontmatter,
    /// An opening or closing code fence line
    FenceDelimiter,
    /// A line inside a code fence
    Fence,
    /// A Markdown table row
    TableRow,
    Blank,
    Prose,
}

impl LineKind {
    /// Whether inline checks (links, width, bare routes) apply to this line.
    pub fn is_prose(self) -> bool {
        self == LineKind::Prose
    }

    /// Whether the line is outside frontmatter and code fences.
    pub fn is_body_text(self) -> bool {
        matches!(self, LineKind::Prose | LineKind::TableRow)
    }
}

/// A classified line with its 1-based number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedLine<'a> {
    pub number: usize,
    pub text: &'a str,
    pub kind: LineKind,
}

/// Line-by-line automaton tracking frontmatter and fence state.
#[derive(Debug, Clone)]
pub struct LineScanner {
    state: ScanState,
}

impl Default for LineScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl LineScanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::BeforeFrontmatter,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Classify the next line and advance the automaton.
    pub fn classify(&mut self, line: &str) -> LineKind {
        let trimmed = line.trim_start_matches(BOM).trim();
        match self.state {
            ScanState::BeforeFrontmatter => {
                if trimmed == FRONTMATTER_DELIM {
                    self.state = ScanState::InFrontmatter;
                    LineKind::Frontmatter
                } else if trimmed.is_empty() {
                    LineKind::Blank
                } else {
                    self.state = ScanState::Body;
                    self.classify_body(trimmed)
                }
            }
            ScanState::InFrontmatter => {
                if trimmed == FRONTMATTER_DELIM {
                    self.state = ScanState::Body;
                }
                LineKind::Frontmatter
            }
            ScanState::Body => self.classify_body(trimmed),
            ScanState::InFence => {
                if trimmed.starts_with(FENCE_MARKER) {
                    self.state = ScanState::Body;
                    LineKind::FenceDelimiter
                } else {
                    LineKind::Fence
                }
            }
        }
    }

    fn classify_body(&mut self, trimmed: &str) -> LineKind {
        if trimmed.starts_with(FENCE_MARKER) {
            self.state = ScanState::InFence;
            LineKind::FenceDelimiter
        } else if trimmed.starts_with('|') {
            LineKind::TableRow
        } else if trimmed.is_empty() {
            LineKind::Blank
        } else {
            LineKind::Prose
        }
    }
}

/// Classify every line of a page.
pub fn scan_lines(text: &str) -> Vec<ScannedLine<'_>> {
    let mut scanner = LineScanner::new();
    text.lines()
        .enumerate()
        .map(|(i, line)| ScannedLine {
            number: i + 1,
            text: line,
            kind: scanner.classify(line),
        })
        .collect()
}
