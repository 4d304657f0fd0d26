pub mod config;
pub mod http_fetcher;

pub use config::FetchConfig;
pub use http_fetcher::HttpFetcher;

use async_trait::async_trait;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Body bytes of the final hop, possibly cut short at the size cap
    Body { bytes: Vec<u8>, truncated: bool },
    /// Redirect chain exceeded the hop bound
    RedirectLoop,
    /// DNS, connection or protocol failure
    NetworkError,
    /// A hop exceeded its deadline
    Timeout,
    /// Input could not be parsed as a URL even with a scheme added
    MalformedInput,
}

impl FetchOutcome {
    pub fn is_body(&self) -> bool {
        matches!(self, FetchOutcome::Body { .. })
    }
}

/// What a single hop produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Body { len: usize, truncated: bool },
    Redirect(Url),
    Error(String),
}

/// One HTTP round trip within a redirect chain. Only used for logging.
#[derive(Debug, Clone)]
pub struct FetchAttempt {
    pub url: Url,
    pub hop: usize,
    pub outcome: AttemptOutcome,
}

#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

/// Prefix `https://` unless the input already names an http(s) scheme.
pub fn with_scheme(input: &str) -> String {
    let input = input.trim();
    let lower = input
        .get(..8)
        .unwrap_or(input)
        .to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    }
}

/// Add a scheme if needed and parse.
pub fn normalize_url(input: &str) -> Result<Url, url::ParseError> {
    Url::parse(&with_scheme(input))
}

/// Resolve a `Location` header against the URL that produced it.
pub fn resolve_location(base: &Url, location: &str) -> Result<Url, url::ParseError> {
    // Url::join passes absolute references through unchanged
    base.join(location.trim())
}
