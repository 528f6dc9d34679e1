//! # markdown-preview engine
//!
//! Converts markdown text into an HTML fragment. Two renderers are available:
//!
//! - **Block parser** (`block`): a single-pass, line-oriented state machine with a
//!   regex-driven inline formatter. Handles tables, task lists, footnotes and
//!   soft line breaks the way the preview surface expects.
//! - **Standards pipeline** (`pipeline`): a CommonMark renderer backed by
//!   `pulldown-cmark`, consulted first for documents that use none of the
//!   features above.
//!
//! The `selector` decides between them per call and falls back to the block
//! parser whenever the standards pipeline fails. `Renderer` wraps the selector
//! with the load-before-use lifecycle the UI collaborators rely on.

pub mod block;
pub mod cursor;
pub mod export;
pub mod footnotes;
pub mod inline;
pub mod list;
pub mod pipeline;
pub mod renderer;
pub mod selector;
pub mod table;

pub use block::parse_blocks;
pub use export::{ExportOptions, standalone_document};
pub use pipeline::{CommonMarkPipeline, PipelineError, StandardsPipeline};
pub use renderer::{RenderError, Renderer};
pub use selector::{Feature, ParserMode, ParserSelector, Route};
