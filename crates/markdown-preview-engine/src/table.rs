//! Pipe-delimited tables.
//!
//! A table is a header row followed by a separator row (`|---|:---:|`), then
//! every following line that contains a pipe. Data rows are normalised to the
//! header's cell count: missing cells render empty, extra cells are dropped.

use std::sync::OnceLock;

use regex::Regex;

use crate::footnotes::OrderedSet;
use crate::inline::format_inline;

/// Closes the body and the table opened by [`TableContext::render_head`].
pub const TABLE_CLOSE: &str = "</tbody>\n</table>\n";

/// Horizontal alignment of a column, taken from the separator row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Parses one separator cell: `:-:` is center, `-:` is right, anything else left.
    pub fn from_separator_cell(cell: &str) -> Self {
        if cell.starts_with(':') && cell.ends_with(':') {
            Alignment::Center
        } else if cell.ends_with(':') {
            Alignment::Right
        } else {
            Alignment::Left
        }
    }

    /// The `style` attribute for a cell, empty for the default left alignment.
    fn style_attr(self) -> &'static str {
        match self {
            Alignment::Left => "",
            Alignment::Center => " style=\"text-align: center\"",
            Alignment::Right => " style=\"text-align: right\"",
        }
    }
}

fn separator_regex() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"^\|?[\s\-|:]+\|?$").expect("Invalid separator regex"))
}

/// True if `line` is a separator row: only spaces, hyphens, colons and pipes,
/// with at least one hyphen.
pub fn is_separator_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.contains('-') && separator_regex().is_match(trimmed)
}

/// True if `line` is a table header, i.e. it has a pipe and the next line is a separator.
pub fn is_table_start(line: &str, next_line: Option<&str>) -> bool {
    line.contains('|') && next_line.is_some_and(is_separator_row)
}

/// Splits a row on `|`, trimming each cell and dropping the empty cells
/// produced by leading/trailing pipes.
pub fn parse_row(line: &str) -> Vec<String> {
    let mut cells: Vec<String> = line
        .trim()
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect();
    if cells.first().is_some_and(String::is_empty) {
        cells.remove(0);
    }
    if cells.last().is_some_and(String::is_empty) {
        cells.pop();
    }
    cells
}

/// Column alignments from a separator row.
pub fn parse_alignment(separator: &str) -> Vec<Alignment> {
    parse_row(separator)
        .iter()
        .map(|cell| Alignment::from_separator_cell(cell))
        .collect()
}

/// Header cells and column alignments of the table being emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableContext {
    pub headers: Vec<String>,
    pub alignments: Vec<Alignment>,
}

impl TableContext {
    pub fn new(header_line: &str, separator_line: &str) -> Self {
        Self {
            headers: parse_row(header_line),
            alignments: parse_alignment(separator_line),
        }
    }

    fn alignment(&self, column: usize) -> Alignment {
        self.alignments.get(column).copied().unwrap_or_default()
    }

    /// Opens the table and emits the header row and `<tbody>`.
    pub fn render_head(&self, references: &mut OrderedSet<String>) -> String {
        let mut html = String::from("<table>\n<thead>\n<tr>\n");
        for (i, header) in self.headers.iter().enumerate() {
            html.push_str(&format!(
                "  <th{}>{}</th>\n",
                self.alignment(i).style_attr(),
                format_inline(header, references)
            ));
        }
        html.push_str("</tr>\n</thead>\n<tbody>\n");
        html
    }

    /// Emits one body row, padded or truncated to the header's width.
    pub fn render_row(&self, line: &str, references: &mut OrderedSet<String>) -> String {
        let cells = parse_row(line);
        if cells.len() != self.headers.len() {
            log::debug!(
                "table row has {} cells, header has {}",
                cells.len(),
                self.headers.len()
            );
        }

        let mut html = String::from("<tr>\n");
        for i in 0..self.headers.len() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            html.push_str(&format!(
                "  <td{}>{}</td>\n",
                self.alignment(i).style_attr(),
                format_inline(cell, references)
            ));
        }
        html.push_str("</tr>\n");
        html
    }
}
