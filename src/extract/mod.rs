//! Title extraction from fetched HTML.
//!
//! # Architecture
//!
//! ```text
//! body → Document::parse → strategies (priority order) → TitleCleaner → title
//! ```
//!
//! The body is parsed once with `scraper`. Each [`TitleStrategy`] looks for one
//! source of title text; the first strategy with a non-blank match wins and
//! later strategies are not consulted. The winning string is cleaned; if
//! nothing survives cleaning the page is treated as having no title.

mod clean;
mod config;
pub mod document;
pub mod strategies;

pub use clean::TitleCleaner;
pub use config::TitleConfig;
pub use document::Document;
pub use strategies::{default_strategies, TitleStrategy};

use tracing::debug;

/// A raw match from one strategy, before cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionCandidate {
    pub strategy: &'static str,
    pub raw: String,
}

/// A cleaned title and the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub strategy: &'static str,
    pub title: String,
}

pub struct ExtractionPipeline {
    strategies: Vec<Box<dyn TitleStrategy>>,
    cleaner: TitleCleaner,
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new(&TitleConfig::default())
    }
}

impl ExtractionPipeline {
    pub fn new(config: &TitleConfig) -> Self {
        Self::with_strategies(default_strategies(), config)
    }

    pub fn with_strategies(strategies: Vec<Box<dyn TitleStrategy>>, config: &TitleConfig) -> Self {
        Self {
            strategies,
            cleaner: TitleCleaner::new(config),
        }
    }

    pub fn cleaner(&self) -> &TitleCleaner {
        &self.cleaner
    }

    /// Every non-blank raw match, in priority order.
    pub fn candidates(&self, body: &str) -> Vec<ExtractionCandidate> {
        let doc = Document::parse(body);
        self.strategies
            .iter()
            .filter_map(|strategy| {
                strategy
                    .try_extract(&doc)
                    .filter(|raw| !raw.trim().is_empty())
                    .map(|raw| ExtractionCandidate {
                        strategy: strategy.name(),
                        raw,
                    })
            })
            .collect()
    }

    /// Clean the first candidate. Later strategies run only while earlier
    /// ones find nothing; a first match that cleans to nothing means no title.
    pub fn extract(&self, body: &str) -> Option<Extracted> {
        let doc = Document::parse(body);

        for strategy in &self.strategies {
            let Some(raw) = strategy.try_extract(&doc) else {
                continue;
            };
            if raw.trim().is_empty() {
                continue;
            }

            debug!("Strategy {} matched {:?}", strategy.name(), raw);
            return self.cleaner.clean(&raw).map(|title| Extracted {
                strategy: strategy.name(),
                title,
            });
        }

        None
    }
}

/// Run the default pipeline over `body`.
pub fn extract_title(body: &str) -> Option<String> {
    ExtractionPipeline::default()
        .extract(body)
        .map(|extracted| extracted.title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_og_title_beats_document_title() {
        let html = r#"<html><head>
            <title>Document Title</title>
            <meta property="og:title" content="Social Title">
        </head></html>"#;
        assert_eq!(extract_title(html), Some("Social Title".into()));
    }

    #[test]
    fn test_priority_order() {
        let html = r#"
            <meta name="description" content="Description">
            <meta itemprop="name" content="Item Name">
            <title>Doc</title>
            <meta name="twitter:title" content="Twitter">
        "#;
        let pipeline = ExtractionPipeline::default();
        let extracted = pipeline.extract(html).unwrap();
        assert_eq!(extracted.strategy, "twitter:title");
        assert_eq!(extracted.title, "Twitter");
    }

    #[test]
    fn test_blank_match_falls_through() {
        let html = r#"<meta property="og:title" content=""><title>  </title><meta itemprop="name" content="Name">"#;
        assert_eq!(extract_title(html), Some("Name".into()));
    }

    #[test]
    fn test_description_only() {
        let html = r#"<meta name="description" content="Hello World">"#;
        assert_eq!(extract_title(html), Some("Hello World".into()));
    }

    #[test]
    fn test_json_ld_last_resort() {
        let html = r#"<script type="application/ld+json">{"headline":"Breaking &amp; News"}</script>"#;
        assert_eq!(extract_title(html), Some("Breaking & News".into()));
    }

    #[test]
    fn test_malformed_json_ld_does_not_abort() {
        let html = r#"<script type="application/ld+json">{oops</script>"#;
        assert_eq!(extract_title(html), None);
    }

    #[test]
    fn test_no_patterns() {
        assert_eq!(extract_title("<html><body><p>Nothing here</p></body></html>"), None);
        assert_eq!(extract_title(""), None);
    }

    #[test]
    fn test_first_match_cleaning_to_empty_is_no_title() {
        let html = r#"<title>&nbsp;</title><meta name="description" content="Unused">"#;
        assert_eq!(extract_title(html), None);
    }

    #[test]
    fn test_title_is_cleaned() {
        let html = "<title>\n  Quarterly Plan &amp; Budget\r\n - Google Sheets </title>";
        assert_eq!(extract_title(html), Some("Quarterly Plan & Budget".into()));
    }

    #[test]
    fn test_candidates_lists_all_matches() {
        let html = r#"<title>Doc</title><meta name="description" content="Desc">"#;
        let candidates = ExtractionPipeline::default().candidates(html);
        assert_eq!(
            candidates,
            vec![
                ExtractionCandidate {
                    strategy: "title",
                    raw: "Doc".into()
                },
                ExtractionCandidate {
                    strategy: "description",
                    raw: "Desc".into()
                },
            ]
        );
    }

    #[test]
    fn test_custom_strategy_list() {
        let strategies: Vec<Box<dyn TitleStrategy>> = vec![Box::new(strategies::MetaDescription)];
        let pipeline = ExtractionPipeline::with_strategies(strategies, &TitleConfig::default());
        let html = r#"<title>Ignored</title><meta name="description" content="Used">"#;
        assert_eq!(pipeline.extract(html).unwrap().title, "Used");
    }
}
