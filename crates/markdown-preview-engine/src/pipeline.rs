//! The external standards pipeline.
//!
//! Any CommonMark-compliant renderer can sit behind [`StandardsPipeline`]. The
//! default [`CommonMarkPipeline`] uses `pulldown-cmark` with no extensions and
//! never passes raw HTML through: HTML blocks and inline HTML are emitted as
//! escaped text, and `javascript:`/`vbscript:`/`data:` link targets are dropped.

use async_trait::async_trait;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Standards pipeline unavailable: {0}")]
    Unavailable(String),
    #[error("Standards pipeline failed: {0}")]
    Failed(String),
}

/// A markdown to HTML converter consulted before the block parser.
///
/// Implementations may fail; callers recover by falling back to the block parser.
#[async_trait]
pub trait StandardsPipeline: Send + Sync {
    async fn process(&self, markdown: &str) -> Result<String, PipelineError>;
}

/// CommonMark rendering through `pulldown-cmark`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommonMarkPipeline;

#[async_trait]
impl StandardsPipeline for CommonMarkPipeline {
    async fn process(&self, markdown: &str) -> Result<String, PipelineError> {
        Ok(render_commonmark(markdown))
    }
}

fn is_script_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    ["javascript:", "vbscript:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

/// Renders CommonMark to HTML with raw HTML neutralised.
pub fn render_commonmark(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::empty()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if is_script_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed(""),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
