//! # Parser Selection
//!
//! Chooses between the standards pipeline and the block parser for each call.
//!
//! The standards pipeline handles plain CommonMark well but not the extensions
//! the preview relies on, so documents that use any [`Feature`] go straight to
//! the block parser. These checks are regex heuristics and will misclassify
//! some documents: a pipe pair in ordinary prose looks like a table and routes
//! to the block parser. That false positive is accepted.

use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::block::{LineKind, classify, parse_blocks};
use crate::pipeline::{CommonMarkPipeline, StandardsPipeline};

/// A syntax feature the standards pipeline does not render the way the preview expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Footnotes,
    ComplexImages,
    Tables,
    TaskLists,
    HorizontalRules,
    /// Two consecutive plain lines, whose soft break CommonMark would collapse.
    ConsecutiveLines,
}

struct FeaturePatterns {
    footnote: Regex,
    query_image: Regex,
    badge_image: Regex,
    table: Regex,
    task: Regex,
    rule: Regex,
}

fn patterns() -> &'static FeaturePatterns {
    static PATTERNS: OnceLock<FeaturePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| FeaturePatterns {
        footnote: Regex::new(r"\[\^[^\]]+\]").expect("Invalid footnote regex"),
        query_image: Regex::new(r"!\[[^\]]*\]\([^)]*[&?][^)]*\)").expect("Invalid image regex"),
        badge_image: Regex::new(r"\[!\[[^\]]*\]\([^)]+\)\]\([^)]+\)")
            .expect("Invalid badge regex"),
        table: Regex::new(r"\|.*\|").expect("Invalid table regex"),
        task: Regex::new(r"(?m)^\s*[-*+]\s+\[[ xX]\]").expect("Invalid task regex"),
        rule: Regex::new(r"(?m)^[ \t]*(?:-{3,}|\*{3,}|_{3,})[ \t\r]*$")
            .expect("Invalid rule regex"),
    })
}

impl Feature {
    /// Every feature, in the order they are checked.
    pub const ALL: [Feature; 6] = [
        Feature::Footnotes,
        Feature::ComplexImages,
        Feature::Tables,
        Feature::TaskLists,
        Feature::HorizontalRules,
        Feature::ConsecutiveLines,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::Footnotes => "footnotes",
            Feature::ComplexImages => "complex images",
            Feature::Tables => "tables",
            Feature::TaskLists => "task lists",
            Feature::HorizontalRules => "horizontal rules",
            Feature::ConsecutiveLines => "consecutive lines",
        }
    }

    /// Whether `markdown` appears to use this feature.
    pub fn detect(self, markdown: &str) -> bool {
        let p = patterns();
        match self {
            Feature::Footnotes => markdown.contains("[^") && p.footnote.is_match(markdown),
            Feature::ComplexImages => {
                markdown.contains("![")
                    && (p.query_image.is_match(markdown) || p.badge_image.is_match(markdown))
            }
            Feature::Tables => markdown.contains('|') && p.table.is_match(markdown),
            Feature::TaskLists => p.task.is_match(markdown),
            Feature::HorizontalRules => p.rule.is_match(markdown),
            Feature::ConsecutiveLines => has_consecutive_plain_lines(markdown),
        }
    }

    /// The first feature `markdown` uses, if any.
    pub fn first_detected(markdown: &str) -> Option<Feature> {
        Self::ALL.into_iter().find(|feature| feature.detect(markdown))
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Non-blank, and not a header, quote or list item.
fn is_plain_line(line: &str) -> bool {
    !matches!(
        classify(line),
        LineKind::Blank | LineKind::Header { .. } | LineKind::Blockquote(_) | LineKind::ListItem(_)
    )
}

fn has_consecutive_plain_lines(markdown: &str) -> bool {
    let lines: Vec<&str> = markdown.lines().collect();
    lines
        .windows(2)
        .any(|pair| is_plain_line(pair[0]) && is_plain_line(pair[1]))
}

/// How the selector treats the standards pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParserMode {
    /// Route by feature detection.
    #[default]
    Auto,
    /// Always use the block parser.
    FallbackOnly,
    /// Always try the standards pipeline first, still falling back on failure.
    Standards,
}

/// Which renderer a document is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    StandardsPipeline,
    /// `trigger` names the detected feature; `None` when no pipeline is in use.
    BlockParser { trigger: Option<Feature> },
}

/// Routes each document to the standards pipeline or the block parser.
#[derive(Clone)]
pub struct ParserSelector {
    pipeline: Option<Arc<dyn StandardsPipeline>>,
    mode: ParserMode,
}

impl ParserSelector {
    /// Feature-based routing with the given standards pipeline.
    pub fn new(pipeline: Arc<dyn StandardsPipeline>) -> Self {
        Self {
            pipeline: Some(pipeline),
            mode: ParserMode::Auto,
        }
    }

    /// A selector that only ever uses the block parser.
    pub fn fallback_only() -> Self {
        Self {
            pipeline: None,
            mode: ParserMode::FallbackOnly,
        }
    }

    /// A selector for `mode`, using [`CommonMarkPipeline`] where a pipeline is needed.
    pub fn for_mode(mode: ParserMode) -> Self {
        match mode {
            ParserMode::FallbackOnly => Self::fallback_only(),
            mode => Self::new(Arc::new(CommonMarkPipeline)).with_mode(mode),
        }
    }

    pub fn with_mode(mut self, mode: ParserMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ParserMode {
        self.mode
    }

    /// Decides where `markdown` goes. Pure; re-evaluated on every call.
    pub fn route(&self, markdown: &str) -> Route {
        if self.pipeline.is_none() || self.mode == ParserMode::FallbackOnly {
            return Route::BlockParser { trigger: None };
        }
        if self.mode == ParserMode::Standards {
            return Route::StandardsPipeline;
        }
        match Feature::first_detected(markdown) {
            Some(feature) => Route::BlockParser {
                trigger: Some(feature),
            },
            None => Route::StandardsPipeline,
        }
    }

    /// Renders `markdown` with whichever parser [`route`](Self::route) picks.
    ///
    /// Pipeline failures are logged and recovered from with the block parser,
    /// so this always produces HTML.
    pub async fn select_and_parse(&self, markdown: &str) -> String {
        let pipeline = match (self.route(markdown), &self.pipeline) {
            (Route::StandardsPipeline, Some(pipeline)) => pipeline,
            (Route::BlockParser { trigger: Some(feature) }, _) => {
                log::debug!("{feature} detected, using block parser");
                return parse_blocks(markdown);
            }
            _ => {
                log::debug!("using block parser only");
                return parse_blocks(markdown);
            }
        };

        log::debug!("attempting standards pipeline");
        match pipeline.process(markdown).await {
            Ok(html) => html,
            Err(e) => {
                log::warn!("Standards pipeline failed, using block parser: {e}");
                parse_blocks(markdown)
            }
        }
    }
}

impl fmt::Debug for ParserSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserSelector")
            .field("has_pipeline", &self.pipeline.is_some())
            .field("mode", &self.mode)
            .finish()
    }
}
