/// Markdown rendering and HTML sanitization for post bodies
///
/// Bodies are stored as raw Markdown. For display they are rendered to HTML
/// with [`MarkdownRenderer`] and then filtered through [`AnswerScrubber`].
/// Both are built once at start-up and shared through application state.
///
/// # Example
///
/// ```
/// use askbase_shared::render::{AnswerScrubber, MarkdownRenderer};
///
/// let renderer = MarkdownRenderer::new();
/// let scrubber = AnswerScrubber::new();
///
/// let html = scrubber.scrub(&renderer.render("**bold** <script>x</script>"));
/// assert!(html.contains("<strong>bold</strong>"));
/// assert!(!html.contains("<script>"));
/// ```

pub mod markdown;
pub mod scrubber;

pub use markdown::MarkdownRenderer;
pub use scrubber::AnswerScrubber;

/// Renders Markdown and scrubs the result in one step
pub fn render_safe(renderer: &MarkdownRenderer, scrubber: &AnswerScrubber, body: &str) -> String {
    scrubber.scrub(&renderer.render(body))
}
