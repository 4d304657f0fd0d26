use serde_json::Value;
use tracing::debug;

use crate::extract::document::Document;

/// One source of title text within a parsed page.
pub trait TitleStrategy: Send + Sync {
    /// Short label used in logs and diagnostics
    fn name(&self) -> &'static str;

    /// Raw, uncleaned match, if this source is present
    fn try_extract(&self, doc: &Document) -> Option<String>;
}

/// `<meta property="og:title">`
pub struct OpenGraph;

impl TitleStrategy for OpenGraph {
    fn name(&self) -> &'static str {
        "og:title"
    }

    fn try_extract(&self, doc: &Document) -> Option<String> {
        doc.meta_content(r#"meta[property="og:title" i]"#)
    }
}

/// `<meta name="twitter:title">`
pub struct TwitterCard;

impl TitleStrategy for TwitterCard {
    fn name(&self) -> &'static str {
        "twitter:title"
    }

    fn try_extract(&self, doc: &Document) -> Option<String> {
        doc.meta_content(r#"meta[name="twitter:title" i]"#)
    }
}

/// The first `<title>` element
pub struct DocumentTitle;

impl TitleStrategy for DocumentTitle {
    fn name(&self) -> &'static str {
        "title"
    }

    fn try_extract(&self, doc: &Document) -> Option<String> {
        doc.inner_html("title")
    }
}

/// `<meta itemprop="name">`
pub struct ItemPropName;

impl TitleStrategy for ItemPropName {
    fn name(&self) -> &'static str {
        "itemprop:name"
    }

    fn try_extract(&self, doc: &Document) -> Option<String> {
        doc.meta_content(r#"meta[itemprop="name" i]"#)
    }
}

/// `<meta name="description">`
pub struct MetaDescription;

impl TitleStrategy for MetaDescription {
    fn name(&self) -> &'static str {
        "description"
    }

    fn try_extract(&self, doc: &Document) -> Option<String> {
        doc.meta_content(r#"meta[name="description" i]"#)
    }
}

/// `name`, else `headline`, of the first JSON-LD block.
///
/// A block that is not valid JSON counts as no match.
pub struct JsonLd;

impl TitleStrategy for JsonLd {
    fn name(&self) -> &'static str {
        "ld+json"
    }

    fn try_extract(&self, doc: &Document) -> Option<String> {
        let block = doc.script_of_type("application/ld+json")?;
        let value: Value = match serde_json::from_str(block.trim()) {
            Ok(value) => value,
            Err(e) => {
                debug!("Ignoring malformed JSON-LD block: {}", e);
                return None;
            }
        };

        ["name", "headline"]
            .into_iter()
            .filter_map(|field| value.get(field).and_then(Value::as_str))
            .find(|text| !text.trim().is_empty())
            .map(String::from)
    }
}

/// Strategies in priority order.
pub fn default_strategies() -> Vec<Box<dyn TitleStrategy>> {
    vec![
        Box::new(OpenGraph),
        Box::new(TwitterCard),
        Box::new(DocumentTitle),
        Box::new(ItemPropName),
        Box::new(MetaDescription),
        Box::new(JsonLd),
    ]
}
