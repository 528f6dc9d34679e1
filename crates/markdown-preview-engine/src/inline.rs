//! # Inline Formatting
//!
//! Turns one line of raw text into an HTML fragment. Formatting is a fixed
//! sequence of regex rewrites over the escaped text:
//!
//! 1. HTML-escape `& < > " '`
//! 2. bold (`**x**`, `__x__`)
//! 3. italic (`*x*`, `_x_`)
//! 4. footnote references (`[^label]`), recorded in first-seen order
//! 5. linked badge images (`[![alt](img)](link)`)
//! 6. images (`![alt](url)`)
//! 7. links (`[text](url)`)
//! 8. code spans (`` `x` ``)
//!
//! Later steps never re-escape earlier output. URLs were escaped as plain text
//! in step 1, so they are decoded again before landing in `href`/`src`.
//! Unmatched markers are left as literal escaped text.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::footnotes::OrderedSet;

struct InlinePatterns {
    bold_stars: Regex,
    bold_underscores: Regex,
    italic_stars: Regex,
    italic_underscores: Regex,
    footnote_ref: Regex,
    badge_image: Regex,
    image: Regex,
    link: Regex,
    code_span: Regex,
}

fn patterns() -> &'static InlinePatterns {
    static PATTERNS: OnceLock<InlinePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| InlinePatterns {
        bold_stars: Regex::new(r"\*\*(.*?)\*\*").expect("Invalid bold regex"),
        bold_underscores: Regex::new(r"__(.+?)__").expect("Invalid bold regex"),
        italic_stars: Regex::new(r"\*([^*\s][^*]*[^*\s]|\S)\*").expect("Invalid italic regex"),
        italic_underscores: Regex::new(r"_([^_\s][^_]*[^_\s]|\S)_")
            .expect("Invalid italic regex"),
        footnote_ref: Regex::new(r"\[\^([^\]]+)\]").expect("Invalid footnote regex"),
        badge_image: Regex::new(r"\[!\[([^\]]*)\]\(([^)]+)\)\]\(([^)]+)\)")
            .expect("Invalid badge regex"),
        image: Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("Invalid image regex"),
        link: Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("Invalid link regex"),
        code_span: Regex::new(r"`([^`]+)`").expect("Invalid code span regex"),
    })
}

/// Escapes `& < > " '` so raw text is safe in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// Reverses [`escape_html`] for a URL that is about to become an attribute value.
fn unescape_url(url: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(url)
}

/// Formats one line of raw markdown text as inline HTML.
///
/// Every footnote label referenced in `text` is added to `references`
/// (already-seen labels keep their original position).
pub fn format_inline(text: &str, references: &mut OrderedSet<String>) -> String {
    let p = patterns();

    let escaped = escape_html(text);
    let s = p.bold_stars.replace_all(&escaped, "<strong>$1</strong>");
    let s = p.bold_underscores.replace_all(&s, "<strong>$1</strong>");
    let s = p.italic_stars.replace_all(&s, "<em>$1</em>");
    let s = p.italic_underscores.replace_all(&s, "<em>$1</em>");

    let s = p.footnote_ref.replace_all(&s, |caps: &Captures<'_>| {
        let label = &caps[1];
        references.insert(label.to_string());
        format!(
            "<sup><a href=\"#footnote-{label}\" id=\"footnote-ref-{label}\" class=\"footnote-ref\">{label}</a></sup>"
        )
    });

    let s = p.badge_image.replace_all(&s, |caps: &Captures<'_>| {
        format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\"><img src=\"{}\" alt=\"{}\" /></a>",
            unescape_url(&caps[3]),
            unescape_url(&caps[2]),
            &caps[1]
        )
    });
    let s = p.image.replace_all(&s, |caps: &Captures<'_>| {
        format!(
            "<img src=\"{}\" alt=\"{}\" />",
            unescape_url(&caps[2]),
            &caps[1]
        )
    });
    let s = p.link.replace_all(&s, |caps: &Captures<'_>| {
        format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            unescape_url(&caps[2]),
            &caps[1]
        )
    });

    p.code_span
        .replace_all(&s, "<code>$1</code>")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fmt(text: &str) -> String {
        format_inline(text, &mut OrderedSet::new())
    }

    #[test]
    fn plain_text_is_only_escaped() {
        assert_eq!(fmt("a < b && c > \"d\""), "a &lt; b &amp;&amp; c &gt; &quot;d&quot;");
        assert!(!fmt("it's").contains('\''));
    }

    #[test]
    fn bold_and_italic() {
        assert_eq!(fmt("**bold** and __also__"), "<strong>bold</strong> and <strong>also</strong>");
        assert_eq!(fmt("*it* and _this one_"), "<em>it</em> and <em>this one</em>");
    }

    #[test]
    fn italic_needs_non_space_boundaries() {
        assert_eq!(fmt("2 * 3 * 4"), "2 * 3 * 4");
        assert_eq!(fmt("snake_case_name"), "snake<em>case</em>name");
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        assert_eq!(fmt("**open"), "**open");
        assert_eq!(fmt("[text](unclosed"), "[text](unclosed");
        assert_eq!(fmt("`tick"), "`tick");
    }

    #[test]
    fn footnote_reference_is_recorded_once() {
        let mut refs = OrderedSet::new();
        let html = format_inline("a[^x] b[^y] c[^x]", &mut refs);
        assert!(html.contains(
            "<sup><a href=\"#footnote-x\" id=\"footnote-ref-x\" class=\"footnote-ref\">x</a></sup>"
        ));
        let labels: Vec<&str> = refs.iter().map(String::as_str).collect();
        assert_eq!(labels, vec!["x", "y"]);
    }

    #[test]
    fn link_url_is_unescaped() {
        assert_eq!(
            fmt("[docs](https://example.com/?a=1&b=2)"),
            "<a href=\"https://example.com/?a=1&b=2\" target=\"_blank\" rel=\"noopener noreferrer\">docs</a>"
        );
    }

    #[test]
    fn image() {
        assert_eq!(
            fmt("![logo](img.png)"),
            "<img src=\"img.png\" alt=\"logo\" />"
        );
    }

    #[test]
    fn badge_image_wraps_image_in_link() {
        assert_eq!(
            fmt("[![build](https://ci.example/badge.svg?branch=main&x=1)](https://ci.example)"),
            "<a href=\"https://ci.example\" target=\"_blank\" rel=\"noopener noreferrer\"><img src=\"https://ci.example/badge.svg?branch=main&x=1\" alt=\"build\" /></a>"
        );
    }

    #[test]
    fn code_span() {
        assert_eq!(fmt("run `cargo <x>`"), "run <code>cargo &lt;x&gt;</code>");
    }

    #[test]
    fn empty_input() {
        assert_eq!(fmt(""), "");
    }
}
