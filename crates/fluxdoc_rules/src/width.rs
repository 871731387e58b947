//! Visible text, display width and soft-wrap suggestions for prose lines.
//!
//! Width is an approximation: every code point above ASCII counts as two columns,
//! which is close enough for CJK prose without pulling in a Unicode width table.

use std::sync::LazyLock;

use regex::Regex;

static LIST_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*[-*+]\s+)(.*)$").expect("valid list regex"));
static ORDERED_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*\d+[.)]\s+)(.*)$").expect("valid ordered-list regex"));
static BLOCKQUOTE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*>+\s+)(.*)$").expect("valid blockquote regex"));

const EMPHASIS_MARKERS: &[&str] = &["**", "__", "~~", "*"];

/// Characters after which a line may be broken.
const BREAK_AFTER: &[char] = &[
    ' ', '\t', '，', '。', ',', '.', ';', '；', '：', ':', '、', '!', '！', '?', '？', ')', '）',
    ']', '】', '}', '》', '〉', '/',
];

/// Approximate rendered width: ASCII is one column, everything else two.
pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| if (c as u32) <= 127 { 1 } else { 2 }).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrefixKind {
    Blockquote,
    List,
    Plain,
}

/// Split a line into its block prefix (quote/list marker or indentation) and content.
fn split_prefix(line: &str) -> (&str, &str, PrefixKind) {
    for (regex, kind) in [
        (&*BLOCKQUOTE_PREFIX, PrefixKind::Blockquote),
        (&*LIST_PREFIX, PrefixKind::List),
        (&*ORDERED_PREFIX, PrefixKind::List),
    ] {
        if let Some(caps) = regex.captures(line) {
            let prefix = caps.get(1).map_or("", |m| m.as_str());
            let content = caps.get(2).map_or("", |m| m.as_str());
            return (prefix, content, kind);
        }
    }
    let content = line.trim_start();
    (&line[..line.len() - content.len()], content, PrefixKind::Plain)
}

/// An inline span of Markdown that is kept whole when measuring or wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    raw: String,
    visible: String,
    /// Inline code content; not subject to emphasis stripping
    code: bool,
    breakable_after: bool,
    is_whitespace: bool,
}

impl Token {
    fn width(&self) -> usize {
        display_width(&self.visible)
    }
}

/// Split inline Markdown into code spans, links, tags and single characters.
fn tokenize_inline(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < text.len() {
        let rest = &text[i..];
        let Some(ch) = rest.chars().next() else {
            break;
        };

        if ch == '`' {
            let run = rest.len() - rest.trim_start_matches('`').len();
            let delim = &rest[..run];
            if let Some(close) = rest[run..].find(delim) {
                let end = run + close + run;
                tokens.push(Token {
                    raw: rest[..end].to_string(),
                    visible: rest[run..run + close].to_string(),
                    code: true,
                    breakable_after: true,
                    is_whitespace: false,
                });
                i += end;
                continue;
            }
        }

        if ch == '[' {
            if let Some(close) = rest[1..].find(']').map(|p| p + 1) {
                if rest[close + 1..].starts_with('(') {
                    if let Some(paren) = rest[close + 2..].find(')').map(|p| p + close + 2) {
                        tokens.push(Token {
                            raw: rest[..=paren].to_string(),
                            visible: rest[1..close].to_string(),
                            code: false,
                            breakable_after: true,
                            is_whitespace: false,
                        });
                        i += paren + 1;
                        continue;
                    }
                }
            }
        }

        if ch == '<' {
            if let Some(close) = rest[1..].find('>').map(|p| p + 1) {
                tokens.push(Token {
                    raw: rest[..=close].to_string(),
                    visible: String::new(),
                    code: false,
                    breakable_after: false,
                    is_whitespace: false,
                });
                i += close + 1;
                continue;
            }
        }

        let is_whitespace = ch.is_whitespace();
        tokens.push(Token {
            raw: ch.to_string(),
            visible: ch.to_string(),
            code: false,
            breakable_after: is_whitespace || BREAK_AFTER.contains(&ch),
            is_whitespace,
        });
        i += ch.len_utf8();
    }

    tokens
}

fn strip_emphasis(text: &str) -> String {
    EMPHASIS_MARKERS
        .iter()
        .fold(text.to_string(), |acc, marker| acc.replace(marker, ""))
}

/// The text a reader actually sees on a prose line.
///
/// List and quote markers are dropped, links become their label, inline code keeps
/// its content, emphasis markers and tags disappear and whitespace is collapsed.
pub fn visible_text(line: &str) -> String {
    let (_, content, _) = split_prefix(line);

    let mut out = String::new();
    let mut plain = String::new();
    for token in tokenize_inline(content) {
        if token.code {
            out.push_str(&strip_emphasis(&plain));
            plain.clear();
            out.push_str(&token.visible);
        } else {
            plain.push_str(&token.visible);
        }
    }
    out.push_str(&strip_emphasis(&plain));

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible width of a prose line.
pub fn visible_width(line: &str) -> usize {
    display_width(&visible_text(line))
}

fn flush_line(lines: &mut Vec<String>, tokens: &[Token]) {
    let raw: String = tokens.iter().map(|t| t.raw.as_str()).collect();
    let raw = raw.trim_end();
    if !raw.is_empty() || !lines.is_empty() {
        lines.push(raw.to_string());
    }
}

fn last_break(tokens: &[Token]) -> Option<usize> {
    tokens.iter().rposition(|t| t.breakable_after).map(|i| i + 1)
}

/// Greedily wrap inline Markdown so each line's visible width stays within `max_width`.
///
/// Code spans, links and tags are never split. A token wider than the limit on its
/// own ends up on a line by itself.
pub fn wrap_inline(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    let mut current_width = 0;
    let mut break_at: Option<usize> = None;

    for token in tokenize_inline(text) {
        loop {
            if current.is_empty() && token.is_whitespace {
                break;
            }

            if current.is_empty() {
                current_width = token.width();
                break_at = token.breakable_after.then_some(1);
                current.push(token.clone());
                break;
            }

            if current_width + token.width() <= max_width {
                current_width += token.width();
                current.push(token.clone());
                if token.breakable_after {
                    break_at = Some(current.len());
                }
                break;
            }

            if let Some(at) = break_at.filter(|&at| at > 0) {
                let remainder = current.split_off(at);
                flush_line(&mut lines, &current);
                current = remainder
                    .into_iter()
                    .skip_while(|t| t.is_whitespace)
                    .collect();
                current_width = current.iter().map(Token::width).sum();
                break_at = last_break(&current);
                continue;
            }

            flush_line(&mut lines, &current);
            current.clear();
            current_width = 0;
            break_at = None;
        }
    }

    if !current.is_empty() {
        flush_line(&mut lines, &current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Suggest a soft-wrapped rendition of a whole line, keeping its block prefix.
///
/// List continuation lines are indented under the item text; quote lines repeat
/// the quote marker.
pub fn suggest_wrap(line: &str, max_width: usize) -> Vec<String> {
    let (prefix, content, kind) = split_prefix(line.trim_end());
    let wrapped = wrap_inline(content, max_width);

    let continuation = match kind {
        PrefixKind::List => " ".repeat(prefix.len()),
        PrefixKind::Blockquote | PrefixKind::Plain => prefix.to_string(),
    };

    wrapped
        .iter()
        .enumerate()
        .map(|(i, part)| {
            if i == 0 {
                format!("{prefix}{part}")
            } else {
                format!("{continuation}{part}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("中文"), 4);
        assert_eq!(display_width("é"), 2);
    }

    #[test]
    fn test_visible_text_strips_markdown() {
        assert_eq!(
            visible_text("- See [the **quickstart**](/guides/quickstart) and `a*b`  now"),
            "See the quickstart and a*b now"
        );
        assert_eq!(visible_text("1. <Note>Read</Note> ~~this~~"), "Read this");
        assert_eq!(visible_text("> quoted   text"), "quoted text");
    }

    #[test]
    fn test_visible_width_counts_wide_chars() {
        assert_eq!(visible_width("**中文** ok"), 7);
    }

    #[test]
    fn test_wrap_inline_breaks_at_spaces() {
        let lines = wrap_inline("alpha beta gamma delta", 11);
        assert_eq!(lines, vec!["alpha beta", "gamma delta"]);
        for line in &lines {
            assert!(display_width(line) <= 11);
        }
    }

    #[test]
    fn test_wrap_keeps_links_whole() {
        let lines = wrap_inline("read [the quick start guide](/guides/quickstart) today", 20);
        assert_eq!(lines[0], "read");
        assert_eq!(lines[1], "[the quick start guide](/guides/quickstart)");
        assert_eq!(lines[2], "today");
    }

    #[test]
    fn test_wrap_breaks_after_cjk_punctuation() {
        let lines = wrap_inline("你好，世界。再见", 6);
        assert_eq!(lines, vec!["你好，", "世界。", "再见"]);
    }

    #[test]
    fn test_suggest_wrap_indents_list_items() {
        let lines = suggest_wrap("- alpha beta gamma", 11);
        assert_eq!(lines, vec!["- alpha beta", "  gamma"]);
    }
}
