use serde::{Deserialize, Serialize};

/// A single title lookup, holding the raw input exactly as given.
///
/// The input may lack a scheme or be a bare domain; normalization happens
/// in the fetcher and the URL heuristic, never here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRequest {
    pub raw: String,
}

impl ResolutionRequest {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl From<&str> for ResolutionRequest {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
