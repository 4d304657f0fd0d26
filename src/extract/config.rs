use serde::{Deserialize, Serialize};

/// Configuration for title post-processing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    /// Maximum title length in characters, ellipsis included (default: 200)
    pub max_chars: usize,

    /// Trailing "<sep> Suffix" patterns removed case-insensitively
    pub strip_suffixes: Vec<String>,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            max_chars: 200,
            strip_suffixes: vec![
                "Google Docs".to_string(),
                "Google Sheets".to_string(),
                "Google Slides".to_string(),
            ],
        }
    }
}
