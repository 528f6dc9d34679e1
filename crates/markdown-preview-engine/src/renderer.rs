use std::sync::OnceLock;

use crate::selector::{ParserMode, ParserSelector};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("Parser not loaded yet")]
    NotInitialized,
}

/// Load-once handle around a [`ParserSelector`].
///
/// Rendering before [`load`](Self::load) fails with [`RenderError::NotInitialized`].
/// Loading again is a no-op; the first selector stays in place. The handle is
/// `Sync`, so one instance can serve concurrent renders.
#[derive(Debug, Default)]
pub struct Renderer {
    selector: OnceLock<ParserSelector>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the selector for `mode` unless one is already loaded.
    pub fn load(&self, mode: ParserMode) -> &ParserSelector {
        self.load_with(|| ParserSelector::for_mode(mode))
    }

    /// Installs a custom selector unless one is already loaded.
    pub fn load_with(&self, init: impl FnOnce() -> ParserSelector) -> &ParserSelector {
        if let Some(selector) = self.selector.get() {
            log::debug!("parser already loaded ({:?})", selector.mode());
            return selector;
        }
        let selector = self.selector.get_or_init(init);
        log::info!("Parser loaded ({:?})", selector.mode());
        selector
    }

    pub fn is_loaded(&self) -> bool {
        self.selector.get().is_some()
    }

    /// Converts `markdown` to HTML.
    pub async fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let selector = self.selector.get().ok_or(RenderError::NotInitialized)?;
        Ok(selector.select_and_parse(markdown).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn render_before_load_fails() {
        let renderer = Renderer::new();
        assert!(!renderer.is_loaded());
        assert_eq!(renderer.render("text").await, Err(RenderError::NotInitialized));
    }

    #[tokio::test]
    async fn render_after_load() {
        let renderer = Renderer::new();
        renderer.load(ParserMode::FallbackOnly);
        assert!(renderer.is_loaded());
        assert_eq!(renderer.render("text").await.unwrap(), "<p>text</p>\n");
    }

    #[test]
    fn second_load_keeps_first_selector() {
        let renderer = Renderer::new();
        renderer.load(ParserMode::FallbackOnly);
        let selector = renderer.load(ParserMode::Auto);
        assert_eq!(selector.mode(), ParserMode::FallbackOnly);
    }

    #[test]
    fn not_initialized_message() {
        assert_eq!(RenderError::NotInitialized.to_string(), "Parser not loaded yet");
    }
}
