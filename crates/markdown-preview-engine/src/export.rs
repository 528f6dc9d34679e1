//! Standalone HTML export.
//!
//! Wraps a rendered fragment in a complete document with a readable default
//! stylesheet, for saving a preview to disk.

/// Title used when none is configured.
pub const DEFAULT_TITLE: &str = "Markdown Export";

/// Reading stylesheet embedded in exported documents.
pub const DEFAULT_STYLESHEET: &str = r#"body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    max-width: 800px;
    margin: 0 auto;
    padding: 2rem;
    color: #333;
}
h1, h2, h3, h4, h5, h6 {
    margin-top: 2rem;
    margin-bottom: 1rem;
}
blockquote {
    border-left: 4px solid #ddd;
    margin: 1rem 0;
    padding-left: 1rem;
    color: #666;
}
code {
    background: #f4f4f4;
    padding: 0.2rem 0.4rem;
    border-radius: 3px;
}
pre {
    background: #f4f4f4;
    padding: 1rem;
    border-radius: 5px;
    overflow-x: auto;
}
table {
    border-collapse: collapse;
}
th, td {
    border: 1px solid #ddd;
    padding: 0.4rem 0.8rem;
}
.task-list {
    list-style: none;
    padding-left: 1rem;
}
.footnotes {
    font-size: 0.9em;
    color: #555;
}
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub title: String,
    /// Replaces [`DEFAULT_STYLESHEET`] when set.
    pub stylesheet: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            stylesheet: None,
        }
    }
}

/// Wraps an HTML fragment in a complete `<!DOCTYPE html>` document.
pub fn standalone_document(body: &str, options: &ExportOptions) -> String {
    let title = html_escape::encode_text(&options.title);
    let css = options.stylesheet.as_deref().unwrap_or(DEFAULT_STYLESHEET);
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n\
         <style>\n{css}</style>\n\
         </head>\n\
         <body>\n{body}</body>\n\
         </html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_body_with_default_style() {
        let doc = standalone_document("<p>hi</p>\n", &ExportOptions::default());
        assert!(doc.starts_with("<!DOCTYPE html>\n<html lang=\"en\">\n"));
        assert!(doc.contains("<title>Markdown Export</title>"));
        assert!(doc.contains("max-width: 800px;"));
        assert!(doc.contains("<body>\n<p>hi</p>\n</body>\n</html>\n"));
    }

    #[test]
    fn title_is_escaped_and_stylesheet_replaced() {
        let options = ExportOptions {
            title: "Notes <draft>".to_string(),
            stylesheet: Some("body { color: red; }\n".to_string()),
        };
        let doc = standalone_document("", &options);
        assert!(doc.contains("<title>Notes &lt;draft&gt;</title>"));
        assert!(doc.contains("<style>\nbody { color: red; }\n</style>"));
        assert!(!doc.contains("max-width"));
    }
}
