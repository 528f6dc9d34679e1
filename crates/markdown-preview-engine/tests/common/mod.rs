use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use markdown_preview_engine::{PipelineError, StandardsPipeline};
use regex::Regex;

/// Asserts every block-level opening tag in `html` is closed, in order.
#[allow(dead_code)]
pub fn assert_balanced_block_tags(html: &str) {
    let tag = Regex::new(
        r"<(/?)(p|ul|ol|li|table|thead|tbody|tr|th|td|pre|code|blockquote|div|h[1-6])[\s>]",
    )
    .unwrap();

    let mut stack: Vec<String> = Vec::new();
    for caps in tag.captures_iter(html) {
        let name = caps[2].to_string();
        if caps[1].is_empty() {
            stack.push(name);
        } else {
            let open = stack.pop();
            assert_eq!(
                open.as_deref(),
                Some(name.as_str()),
                "mismatched </{name}> in:\n{html}"
            );
        }
    }
    assert!(stack.is_empty(), "unclosed tags {stack:?} in:\n{html}");
}

/// A pipeline that always fails.
#[allow(dead_code)]
pub struct FailingPipeline;

#[async_trait]
impl StandardsPipeline for FailingPipeline {
    async fn process(&self, _markdown: &str) -> Result<String, PipelineError> {
        Err(PipelineError::Failed("boom".to_string()))
    }
}

/// A pipeline that counts calls and returns a marker.
#[allow(dead_code)]
#[derive(Default)]
pub struct CountingPipeline {
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
pub const PIPELINE_MARKER: &str = "<!-- standards -->";

#[async_trait]
impl StandardsPipeline for CountingPipeline {
    async fn process(&self, _markdown: &str) -> Result<String, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PIPELINE_MARKER.to_string())
    }
}
