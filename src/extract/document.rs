//! A parsed HTML body that title strategies query with CSS selectors.
//!
//! Parsing is html5ever's, so truncated or malformed bodies still yield a
//! tree: an unfinished tag at the end of the input is dropped and an
//! unterminated `<title>` runs to the end.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// Elements matching `css`, in document order. An invalid selector
    /// matches nothing.
    fn select<'a>(&'a self, css: &str) -> Vec<ElementRef<'a>> {
        match Selector::parse(css) {
            Ok(selector) => self.html.select(&selector).collect(),
            Err(_) => {
                debug!("Invalid selector {:?}", css);
                Vec::new()
            }
        }
    }

    /// `content` of the first element matching `css` whose content is not
    /// blank.
    pub fn meta_content(&self, css: &str) -> Option<String> {
        self.select(css)
            .into_iter()
            .filter_map(|element| element.value().attr("content"))
            .find(|content| !content.trim().is_empty())
            .map(String::from)
    }

    /// Markup inside the first element matching `css`. Text comes back
    /// entity-escaped, so `&amp;` in the source stays `&amp;` here.
    pub fn inner_html(&self, css: &str) -> Option<String> {
        self.select(css)
            .into_iter()
            .next()
            .map(|element| element.inner_html())
    }

    /// Body of the first `<script>` whose `type` is `mime` (parameters ignored).
    pub fn script_of_type(&self, mime: &str) -> Option<String> {
        self.select("script[type]")
            .into_iter()
            .find(|element| {
                element.value().attr("type").is_some_and(|ty| {
                    ty.split(';')
                        .next()
                        .unwrap_or_default()
                        .trim()
                        .eq_ignore_ascii_case(mime)
                })
            })
            .map(|element| element.text().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OG_TITLE: &str = r#"meta[property="og:title" i]"#;

    #[test]
    fn test_meta_content_any_attribute_order_and_case() {
        let doc = Document::parse(r#"<META content='Hi' Property="OG:Title">"#);
        assert_eq!(doc.meta_content(OG_TITLE), Some("Hi".into()));
    }

    #[test]
    fn test_unquoted_attributes() {
        let doc = Document::parse("<meta name=description content=plain>");
        assert_eq!(
            doc.meta_content(r#"meta[name="description" i]"#),
            Some("plain".into())
        );
    }

    #[test]
    fn test_meta_content_skips_blank_values() {
        let doc = Document::parse(
            r#"<meta name="description" content="  "><meta name="description" content="Second">"#,
        );
        assert_eq!(
            doc.meta_content(r#"meta[name="description" i]"#),
            Some("Second".into())
        );
    }

    #[test]
    fn test_first_title_wins() {
        let doc = Document::parse("<head><title>One</title><TITLE>Two</TITLE></head>");
        assert_eq!(doc.inner_html("title"), Some("One".into()));
    }

    #[test]
    fn test_title_entities_stay_escaped() {
        let doc = Document::parse("<title>Tom &amp; Jerry&nbsp;</title>");
        assert_eq!(doc.inner_html("title"), Some("Tom &amp; Jerry&nbsp;".into()));
    }

    #[test]
    fn test_script_contents_are_not_tags() {
        let html = r#"<script>var s = "<title>Fake</title>";</script><title>Real</title>"#;
        let doc = Document::parse(html);
        assert_eq!(doc.inner_html("title"), Some("Real".into()));
    }

    #[test]
    fn test_comments_are_skipped() {
        let doc = Document::parse("<!-- <title>Hidden</title> --><title>Shown</title>");
        assert_eq!(doc.inner_html("title"), Some("Shown".into()));
    }

    #[test]
    fn test_script_of_type() {
        let html = r#"<script src="a.js"></script><script type="application/ld+json; charset=utf-8">{"name":"X"}</script>"#;
        let doc = Document::parse(html);
        assert_eq!(
            doc.script_of_type("application/ld+json"),
            Some(r#"{"name":"X"}"#.into())
        );
    }

    #[test]
    fn test_truncated_tag_is_dropped() {
        let doc = Document::parse(r#"<title>Kept</title><meta property="og:title" content="cut"#);
        assert_eq!(doc.inner_html("title"), Some("Kept".into()));
        assert_eq!(doc.meta_content(OG_TITLE), None);
    }

    #[test]
    fn test_unterminated_title_takes_rest() {
        let doc = Document::parse("<title>Partial page title");
        assert_eq!(doc.inner_html("title"), Some("Partial page title".into()));
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let doc = Document::parse("<title>x</title>");
        assert_eq!(doc.inner_html("title[["), None);
    }

    #[test]
    fn test_non_ascii_content() {
        let doc = Document::parse(r#"<meta property="og:title" content="Café ☕"><title>Ünïcode</title>"#);
        assert_eq!(doc.meta_content(OG_TITLE), Some("Café ☕".into()));
        assert_eq!(doc.inner_html("title"), Some("Ünïcode".into()));
    }
}
