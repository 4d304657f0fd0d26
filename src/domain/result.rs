use std::fmt;

use serde::{Deserialize, Serialize};

/// The value handed back to callers.
///
/// `success == false` always comes with no title; `success == true` always
/// carries a non-empty cleaned title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ResolutionResult {
    /// Build a successful result, or a failed one if `title` is blank.
    pub fn found(title: impl Into<String>) -> Self {
        let title = title.into();
        if title.trim().is_empty() {
            return Self::failed();
        }
        Self {
            success: true,
            title: Some(title),
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            title: None,
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(no title)")
    }
}

/// Where a resolved title came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource {
    /// Extracted from the fetched body by the named strategy
    Extracted(&'static str),
    /// Derived from the URL structure alone
    UrlHeuristic,
    /// Nothing produced a title
    None,
}

impl fmt::Display for TitleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleSource::Extracted(strategy) => write!(f, "page:{}", strategy),
            TitleSource::UrlHeuristic => f.write_str("url-heuristic"),
            TitleSource::None => f.write_str("none"),
        }
    }
}

/// A result together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub result: ResolutionResult,
    pub source: TitleSource,
}

impl Resolution {
    pub fn extracted(strategy: &'static str, title: String) -> Self {
        Self {
            result: ResolutionResult::found(title),
            source: TitleSource::Extracted(strategy),
        }
    }

    pub fn heuristic(title: String) -> Self {
        Self {
            result: ResolutionResult::found(title),
            source: TitleSource::UrlHeuristic,
        }
    }

    pub fn failed() -> Self {
        Self {
            result: ResolutionResult::failed(),
            source: TitleSource::None,
        }
    }
}
