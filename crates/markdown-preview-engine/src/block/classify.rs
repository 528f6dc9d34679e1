use std::sync::OnceLock;

use regex::Regex;

use crate::list::ListItem;

/// The prefix that opens and closes a fenced code block.
pub const FENCE: &str = "```";

/// Classification of a single line, independent of surrounding lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// ```` ```lang ```` (opener or closer; `language` is empty when absent).
    Fence { language: &'a str },
    Header { level: usize, text: &'a str },
    HorizontalRule,
    /// `> text`, single line only.
    Blockquote(&'a str),
    ListItem(ListItem),
    FootnoteDefinition { label: &'a str, text: &'a str },
    Blank,
    Paragraph(&'a str),
}

struct BlockPatterns {
    header: Regex,
    horizontal_rule: Regex,
    footnote_definition: Regex,
}

fn patterns() -> &'static BlockPatterns {
    static PATTERNS: OnceLock<BlockPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| BlockPatterns {
        header: Regex::new(r"^(#{1,6})\s+").expect("Invalid header regex"),
        horizontal_rule: Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})$")
            .expect("Invalid horizontal rule regex"),
        footnote_definition: Regex::new(r"^\[\^([^\]]+)\]:\s*(.*)$")
            .expect("Invalid footnote definition regex"),
    })
}

/// Classifies a raw line. Precedence follows the order of [`LineKind`].
pub fn classify(line: &str) -> LineKind<'_> {
    let p = patterns();
    let trimmed = line.trim();

    if let Some(rest) = trimmed.strip_prefix(FENCE) {
        return LineKind::Fence {
            language: rest.trim(),
        };
    }
    if let Some(caps) = p.header.captures(trimmed) {
        let level = caps[1].len();
        return LineKind::Header {
            level,
            text: trimmed[level..].trim(),
        };
    }
    if p.horizontal_rule.is_match(trimmed) {
        return LineKind::HorizontalRule;
    }
    if let Some(quote) = trimmed.strip_prefix("> ") {
        return LineKind::Blockquote(quote);
    }
    if let Some(item) = ListItem::parse(line) {
        return LineKind::ListItem(item);
    }
    if let Some(caps) = p.footnote_definition.captures(trimmed) {
        let (Some(label), Some(text)) = (caps.get(1), caps.get(2)) else {
            return LineKind::Paragraph(trimmed);
        };
        return LineKind::FootnoteDefinition {
            label: label.as_str(),
            text: text.as_str(),
        };
    }
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    LineKind::Paragraph(trimmed)
}

/// True if `line` would continue a run of plain paragraph lines.
///
/// Used to decide whether a paragraph line gets a trailing `<br>`. Lines with
/// a pipe never continue a paragraph since they may start a table.
pub fn is_paragraph_continuation(line: Option<&str>) -> bool {
    line.is_some_and(|l| matches!(classify(l), LineKind::Paragraph(_)) && !l.contains('|'))
}
