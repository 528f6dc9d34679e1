//! Footnote collection and rendering.
//!
//! Definitions (`[^label]: text`) are collected while the block parser runs;
//! references (`[^label]`) are recorded by the inline formatter in the order
//! they are first seen. Only referenced definitions are rendered, in that order.

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::inline::{escape_html, format_inline};

/// An insertion-ordered set: an append-only list plus a membership index.
#[derive(Debug, Clone)]
pub struct OrderedSet<T> {
    items: Vec<T>,
    seen: HashSet<T>,
}

impl<T: Clone + Eq + Hash> OrderedSet<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Appends `item` unless already present. Returns true if it was new.
    pub fn insert(&mut self, item: T) -> bool {
        if self.seen.contains(&item) {
            return false;
        }
        self.seen.insert(item.clone());
        self.items.push(item);
        true
    }

    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.seen.contains(item)
    }

    /// Iterates in first-insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Clone + Eq + Hash> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Footnote definitions keyed by label, plus the labels referenced so far.
///
/// Labels are stored HTML-escaped, matching the form the inline formatter
/// records references in.
#[derive(Debug, Default)]
pub struct FootnoteTable {
    definitions: HashMap<String, String>,
    references: OrderedSet<String>,
}

impl FootnoteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a definition. A later definition of the same label replaces the earlier one.
    pub fn define(&mut self, label: &str, text: &str) {
        self.definitions
            .insert(escape_html(label), text.to_string());
    }

    pub fn definition(&self, label: &str) -> Option<&str> {
        self.definitions.get(label).map(String::as_str)
    }

    pub fn references(&self) -> &OrderedSet<String> {
        &self.references
    }

    /// The reference set the inline formatter records into.
    pub fn references_mut(&mut self) -> &mut OrderedSet<String> {
        &mut self.references
    }

    /// Renders the trailing footnote section, or `None` when nothing was referenced.
    ///
    /// Referenced labels without a definition (or with an empty one) produce no
    /// entry. References that first appear inside footnote text are recorded but
    /// not rendered, since the section is built from the labels seen in the body.
    pub fn render_section(&mut self) -> Option<String> {
        if self.references.is_empty() {
            return None;
        }

        let labels: Vec<String> = self.references.iter().cloned().collect();
        let mut html = String::from("<div class=\"footnotes\">\n<hr>\n<ol>\n");
        for label in &labels {
            let Some(text) = self.definitions.get(label).filter(|t| !t.is_empty()) else {
                log::debug!("footnote [^{label}] referenced but never defined");
                continue;
            };
            let content = format_inline(text, &mut self.references);
            html.push_str(&format!(
                "<li id=\"footnote-{label}\">{content} <a href=\"#footnote-ref-{label}\" class=\"footnote-backref\">↩</a></li>\n"
            ));
        }
        html.push_str("</ol>\n</div>\n");

        log::debug!("rendered footnote section with {} references", labels.len());
        Some(html)
    }
}
