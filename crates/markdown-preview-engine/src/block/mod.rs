//! # Block Parsing
//!
//! Single-pass, line-oriented conversion of a whole document to HTML.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified on its own
//!    into a [`LineKind`] (fence, header, rule, quote, list item, footnote
//!    definition, blank, paragraph).
//! 2. **Block Construction** (`builder`): a [`BlockBuilder`] holds the one open
//!    [`BlockContext`] and emits opening/closing tags as lines arrive. Tables
//!    are recognised here since they need the next line.
//!
//! ## Key Invariants
//!
//! - At most one block context is open at a time
//! - Every opened block tag is closed, including at end of input
//! - Fenced code blocks are raw zones: no block/inline parsing inside
//! - No recursion; one line of lookahead through [`LineCursor::peek_next_line`]

pub mod builder;
pub mod classify;

pub use builder::{BlockBuilder, BlockContext};
pub use classify::{LineKind, classify};

use crate::cursor::LineCursor;

/// Converts a markdown document to an HTML fragment with the block parser.
///
/// Never fails: malformed constructs degrade to literal text and unterminated
/// blocks are closed at end of input. Empty input yields an empty string.
pub fn parse_blocks(markdown: &str) -> String {
    let mut cursor = LineCursor::new(markdown);
    let mut builder = BlockBuilder::new();

    while let Some(line) = cursor.next_line() {
        builder.push(line, &mut cursor);
    }

    builder.finish()
}
