/// CommonMark rendering
use pulldown_cmark::{html, Options, Parser};

/// Renders CommonMark to HTML
///
/// No extensions are enabled. Raw HTML in the input is passed through, so
/// output must go through the scrubber before it reaches a client.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            options: Options::empty(),
        }
    }

    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_paragraph_and_emphasis() {
        let renderer = MarkdownRenderer::new();
        assert_eq!(renderer.render("Hello *world*"), "<p>Hello <em>world</em></p>\n");
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\nfn main() {}\n```");
        assert_eq!(html, "<pre><code>fn main() {}\n</code></pre>\n");
    }

    #[test]
    fn test_extensions_disabled() {
        let renderer = MarkdownRenderer::new();
        // Strikethrough is an extension, so the tildes stay literal
        assert_eq!(renderer.render("~~gone~~"), "<p>~~gone~~</p>\n");
    }
}
