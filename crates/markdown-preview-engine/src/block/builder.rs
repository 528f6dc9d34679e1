use crate::cursor::LineCursor;
use crate::footnotes::FootnoteTable;
use crate::inline::{escape_html, format_inline};
use crate::list::{ListItem, ListKind, continues_after_blank};
use crate::table::{TABLE_CLOSE, TableContext, is_table_start};

use super::classify::{LineKind, classify, is_paragraph_continuation};

/// The single multi-line construct currently open.
///
/// Paragraphs and blockquotes are emitted one line at a time and never
/// persist, so they have no variant here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContext {
    None,
    CodeBlock,
    BulletList,
    NumberedList,
    Table(TableContext),
}

impl BlockContext {
    /// The kind of list currently open, if any.
    pub fn open_list(&self) -> Option<ListKind> {
        match self {
            BlockContext::BulletList => Some(ListKind::Bullet),
            BlockContext::NumberedList => Some(ListKind::Numbered),
            _ => None,
        }
    }

    fn for_list(kind: ListKind) -> Self {
        match kind {
            ListKind::Bullet => BlockContext::BulletList,
            ListKind::Numbered => BlockContext::NumberedList,
        }
    }

    fn close_tag(&self) -> &'static str {
        match self {
            BlockContext::None => "",
            BlockContext::CodeBlock => "</code></pre>\n",
            BlockContext::BulletList => ListKind::Bullet.close_tag(),
            BlockContext::NumberedList => ListKind::Numbered.close_tag(),
            BlockContext::Table(_) => TABLE_CLOSE,
        }
    }
}

/// Line-at-a-time state machine that owns all block tag emission.
pub struct BlockBuilder {
    context: BlockContext,
    out: String,
    footnotes: FootnoteTable,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            context: BlockContext::None,
            out: String::new(),
            footnotes: FootnoteTable::new(),
        }
    }

    pub fn context(&self) -> &BlockContext {
        &self.context
    }

    /// Feeds one line. `cursor` is positioned just after `line` and is
    /// advanced past the separator row when a table starts.
    pub fn push(&mut self, line: &str, cursor: &mut LineCursor<'_>) {
        let kind = classify(line);
        let is_fence = matches!(kind, LineKind::Fence { .. });

        // Inside a code block only a fence means anything.
        if self.context == BlockContext::CodeBlock && !is_fence {
            self.out.push_str(&escape_html(line));
            self.out.push('\n');
            return;
        }

        if !is_fence && self.push_table_line(line, cursor) {
            return;
        }

        match kind {
            LineKind::Fence { language } => self.toggle_fence(language),
            LineKind::Header { level, text } => {
                self.close_context();
                let content = format_inline(text, self.footnotes.references_mut());
                self.out
                    .push_str(&format!("<h{level}>{content}</h{level}>\n"));
            }
            LineKind::HorizontalRule => {
                self.close_context();
                self.out.push_str("<hr>\n");
            }
            LineKind::Blockquote(text) => {
                self.close_context();
                let content = format_inline(text, self.footnotes.references_mut());
                self.out
                    .push_str(&format!("<blockquote><p>{content}</p></blockquote>\n"));
            }
            LineKind::ListItem(item) => self.push_list_item(&item),
            LineKind::FootnoteDefinition { label, text } => {
                log::debug!("footnote definition [^{label}] at line {}", cursor.line_number());
                self.footnotes.define(label, text);
            }
            LineKind::Blank => self.push_blank(cursor.peek_next_line()),
            LineKind::Paragraph(text) => {
                self.close_context();
                let content = format_inline(text, self.footnotes.references_mut());
                if is_paragraph_continuation(cursor.peek_next_line()) {
                    self.out.push_str(&format!("<p>{content}<br></p>\n"));
                } else {
                    self.out.push_str(&format!("<p>{content}</p>\n"));
                }
            }
        }
    }

    /// Closes whatever is still open and appends the footnote section.
    pub fn finish(mut self) -> String {
        self.close_context();
        if let Some(section) = self.footnotes.render_section() {
            self.out.push_str(&section);
        }
        self.out
    }

    fn close_context(&mut self) {
        let prev = std::mem::replace(&mut self.context, BlockContext::None);
        self.out.push_str(prev.close_tag());
    }

    fn toggle_fence(&mut self, language: &str) {
        if self.context == BlockContext::CodeBlock {
            self.close_context();
            return;
        }

        self.close_context();
        if language.is_empty() {
            self.out.push_str("<pre><code>");
        } else {
            self.out.push_str(&format!(
                "<pre><code class=\"language-{}\">",
                escape_html(language)
            ));
        }
        self.context = BlockContext::CodeBlock;
    }

    /// Handles table start, continuation and end. Returns true if the line was consumed.
    fn push_table_line(&mut self, line: &str, cursor: &mut LineCursor<'_>) -> bool {
        let trimmed = line.trim();

        if let BlockContext::Table(ctx) = &self.context {
            if trimmed.contains('|') {
                let row = ctx.render_row(trimmed, self.footnotes.references_mut());
                self.out.push_str(&row);
                return true;
            }
            // A non-pipe line ends the table; blank lines close it in `push_blank`.
            if !trimmed.is_empty() {
                self.close_context();
            }
            return false;
        }

        if !is_table_start(trimmed, cursor.peek_next_line()) {
            return false;
        }
        let Some(separator) = cursor.next_line() else {
            return false;
        };

        self.close_context();
        let ctx = TableContext::new(trimmed, separator);
        let head = ctx.render_head(self.footnotes.references_mut());
        self.out.push_str(&head);
        log::debug!(
            "table with {} columns opened at line {}",
            ctx.headers.len(),
            cursor.line_number() - 1
        );
        self.context = BlockContext::Table(ctx);
        true
    }

    fn push_list_item(&mut self, item: &ListItem) {
        match self.context.open_list() {
            Some(open) if open == item.kind => {}
            // Nested items of the other kind are flattened into the open list.
            Some(_) if item.nested => {}
            _ => {
                self.close_context();
                self.out.push_str(item.open_tag());
                self.context = BlockContext::for_list(item.kind);
            }
        }
        let li = item.render(self.footnotes.references_mut());
        self.out.push_str(&li);
    }

    fn push_blank(&mut self, next_line: Option<&str>) {
        let closes = match self.context.open_list() {
            Some(kind) => !continues_after_blank(kind, next_line),
            None => matches!(self.context, BlockContext::Table(_)),
        };
        if closes {
            self.close_context();
        }

        if self.context.open_list().is_none() {
            self.out.push('\n');
        }
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}
