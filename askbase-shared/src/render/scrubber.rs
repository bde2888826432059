/// Allow-list HTML filter for rendered post bodies
///
/// Keeps a fixed set of formatting tags and a small set of attributes,
/// allowed on any of them. Disallowed elements are unwrapped rather than
/// removed, so their text survives (escaped). URL attributes with schemes
/// other than the usual web ones, such as `javascript:`, are dropped.
///
/// # Allowed
///
/// - Tags: `a p b i em strong hr h1-h6 blockquote img strike del code pre br ul ol li`
/// - Attributes: `href title src height width`

use ammonia::Builder;
use std::collections::{HashMap, HashSet};

/// Tags kept by the scrubber
pub const ALLOWED_TAGS: &[&str] = &[
    "a", "p", "b", "i", "em", "strong", "hr", "h1", "h2", "h3", "h4", "h5", "h6",
    "blockquote", "img", "strike", "del", "code", "pre", "br", "ul", "ol", "li",
];

/// Attributes kept on any allowed tag
pub const ALLOWED_ATTRIBUTES: &[&str] = &["href", "title", "src", "height", "width"];

/// Sanitizer for answer HTML
pub struct AnswerScrubber {
    builder: Builder<'static>,
}

impl AnswerScrubber {
    pub fn new() -> Self {
        let mut builder = Builder::default();
        builder
            .tags(ALLOWED_TAGS.iter().copied().collect())
            .tag_attributes(HashMap::new())
            .generic_attributes(ALLOWED_ATTRIBUTES.iter().copied().collect())
            .clean_content_tags(HashSet::new())
            .link_rel(None);

        Self { builder }
    }

    pub fn scrub(&self, html: &str) -> String {
        self.builder.clean(html).to_string()
    }
}

impl Default for AnswerScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnswerScrubber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerScrubber")
            .field("tags", &ALLOWED_TAGS)
            .field("attributes", &ALLOWED_ATTRIBUTES)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_is_unwrapped_not_executed() {
        let scrubber = AnswerScrubber::new();
        let out = scrubber.scrub("<script>alert(1)</script><p>hi</p>");

        assert!(!out.contains("<script"));
        assert!(out.contains("<p>hi</p>"));
        assert!(out.contains("alert(1)"));
    }

    #[test]
    fn test_event_handler_attribute_dropped() {
        let scrubber = AnswerScrubber::new();
        let out = scrubber.scrub(r#"<a href="x" onclick="y">t</a>"#);

        assert_eq!(out, r#"<a href="x">t</a>"#);
    }

    #[test]
    fn test_javascript_url_dropped() {
        let scrubber = AnswerScrubber::new();
        let out = scrubber.scrub(r#"<a href="javascript:alert(1)">t</a>"#);

        assert_eq!(out, "<a>t</a>");
    }

    #[test]
    fn test_disallowed_tag_keeps_children() {
        let scrubber = AnswerScrubber::new();
        let out = scrubber.scrub("<div><span>inner <b>bold</b></span></div>");

        assert_eq!(out, "inner <b>bold</b>");
    }

    #[test]
    fn test_generic_attributes_on_any_allowed_tag() {
        let scrubber = AnswerScrubber::new();
        let out = scrubber.scrub(r#"<img src="/a.png" width="10" alt="a" class="c">"#);

        assert!(out.contains(r#"src="/a.png""#));
        assert!(out.contains(r#"width="10""#));
        assert!(!out.contains("alt="));
        assert!(!out.contains("class="));

        let out = scrubber.scrub(r#"<p title="t" style="color:red">x</p>"#);
        assert_eq!(out, r#"<p title="t">x</p>"#);
    }
}
