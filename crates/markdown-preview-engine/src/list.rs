//! Bullet, numbered and task list items.
//!
//! Only one level of nesting is recognised: an item indented by two or more
//! whitespace characters is "nested". Nested items are flattened into whatever
//! list is already open rather than producing a nested `<ul>`/`<ol>`.

use std::sync::OnceLock;

use regex::Regex;

use crate::footnotes::OrderedSet;
use crate::inline::format_inline;

/// Leading whitespace at or above this width marks a nested item.
pub const NESTED_INDENT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Numbered,
}

impl ListKind {
    pub fn close_tag(self) -> &'static str {
        match self {
            ListKind::Bullet => "</ul>\n",
            ListKind::Numbered => "</ol>\n",
        }
    }
}

struct ListPatterns {
    bullet: Regex,
    numbered: Regex,
    task: Regex,
}

fn patterns() -> &'static ListPatterns {
    static PATTERNS: OnceLock<ListPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| ListPatterns {
        bullet: Regex::new(r"^[-*+]\s").expect("Invalid bullet regex"),
        numbered: Regex::new(r"^\d+\.\s").expect("Invalid numbered regex"),
        task: Regex::new(r"^[-*+]\s+\[([ xX])\]\s+(.*)$").expect("Invalid task regex"),
    })
}

/// One recognised list line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub kind: ListKind,
    /// Raw item text with the marker (and task box) removed.
    pub text: String,
    pub nested: bool,
    pub is_task: bool,
    pub is_checked: bool,
}

impl ListItem {
    /// Recognises a list item, or returns `None` for any other line.
    pub fn parse(line: &str) -> Option<Self> {
        let p = patterns();
        let trimmed = line.trim();
        let indent = line.len() - line.trim_start().len();
        let nested = indent >= NESTED_INDENT;

        if let Some(m) = p.bullet.find(trimmed) {
            if let Some(caps) = p.task.captures(trimmed) {
                return Some(Self {
                    kind: ListKind::Bullet,
                    text: caps[2].to_string(),
                    nested,
                    is_task: true,
                    is_checked: caps[1].eq_ignore_ascii_case("x"),
                });
            }
            return Some(Self {
                kind: ListKind::Bullet,
                text: trimmed[m.end()..].to_string(),
                nested,
                is_task: false,
                is_checked: false,
            });
        }

        p.numbered.find(trimmed).map(|m| Self {
            kind: ListKind::Numbered,
            text: trimmed[m.end()..].to_string(),
            nested,
            is_task: false,
            is_checked: false,
        })
    }

    /// The tag that opens a list started by this item.
    pub fn open_tag(&self) -> &'static str {
        match (self.kind, self.is_task) {
            (ListKind::Bullet, true) => "<ul class=\"task-list\">\n",
            (ListKind::Bullet, false) => "<ul>\n",
            (ListKind::Numbered, _) => "<ol>\n",
        }
    }

    /// Renders the `<li>` for this item.
    pub fn render(&self, references: &mut OrderedSet<String>) -> String {
        let content = format_inline(&self.text, references);
        if !self.is_task {
            return format!("  <li>{content}</li>\n");
        }

        let (checked_class, checked_attr) = if self.is_checked {
            (" task-list-item-checked", " checked")
        } else {
            ("", "")
        };
        format!(
            "  <li class=\"task-list-item{checked_class}\"><input type=\"checkbox\"{checked_attr} disabled> <span class=\"task-text\">{content}</span></li>\n"
        )
    }
}

/// Whether a list of `kind` stays open across a blank line followed by `next_line`.
///
/// It does when the next line is an item of the same kind, at top level or nested.
pub fn continues_after_blank(kind: ListKind, next_line: Option<&str>) -> bool {
    next_line
        .and_then(ListItem::parse)
        .is_some_and(|item| item.kind == kind)
}
