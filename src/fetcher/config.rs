use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the HTTP fetch client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-hop request timeout in seconds (default: 5)
    pub timeout_secs: u64,

    /// Maximum number of redirects followed before giving up (default: 5)
    pub max_redirects: usize,

    /// Body bytes read before the stream is abandoned (default: 64 KiB)
    pub max_body_bytes: usize,

    /// User agent sent with every request
    pub user_agent: String,

    /// Accept header sent with every request
    pub accept: String,

    /// Honor HTTP_PROXY/HTTPS_PROXY from the environment (default: true)
    pub system_proxy: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            max_redirects: 5,
            max_body_bytes: 64 * 1024,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                .to_string(),
            system_proxy: true,
        }
    }
}

impl FetchConfig {
    /// Get the per-hop timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
