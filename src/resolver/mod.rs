//! Title resolution: fetch, extract, fall back to the URL.
//!
//! ```text
//! Fetching ──Body──▶ Extracting ──title──▶ Success
//!    │                   │
//!    └──failure──▶ FallbackNeeded ◀──no title
//!                        │
//!                        ├──heuristic──▶ Success
//!                        └──nothing────▶ Failed
//! ```
//!
//! Every path ends in a [`ResolutionResult`]; failures are values, not errors.

pub mod fallback;
pub mod parallel;

pub use fallback::title_from_url;
pub use parallel::ParallelResolver;

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::app::Result;
use crate::config::Config;
use crate::domain::{Resolution, ResolutionRequest, ResolutionResult};
use crate::extract::ExtractionPipeline;
use crate::fetcher::{FetchOutcome, Fetcher, HttpFetcher};

/// Why the resolver turned to the URL heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    NetworkError,
    Timeout,
    RedirectLoop,
    NoTitleFound,
    MalformedInput,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            FallbackReason::NetworkError => "network error",
            FallbackReason::Timeout => "timed out",
            FallbackReason::RedirectLoop => "too many redirects",
            FallbackReason::NoTitleFound => "no title found",
            FallbackReason::MalformedInput => "malformed URL",
        };
        f.write_str(reason)
    }
}

enum State {
    Fetching,
    Extracting(Vec<u8>),
    FallbackNeeded(FallbackReason),
    Done(Resolution),
}

pub struct TitleResolver {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    pipeline: ExtractionPipeline,
}

impl TitleResolver {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, pipeline: ExtractionPipeline) -> Self {
        Self { fetcher, pipeline }
    }

    /// Resolver backed by [`HttpFetcher`] with the given settings.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.fetch)?);
        Ok(Self::new(fetcher, ExtractionPipeline::new(&config.title)))
    }

    pub fn pipeline(&self) -> &ExtractionPipeline {
        &self.pipeline
    }

    pub async fn resolve(&self, url: &str) -> ResolutionResult {
        self.resolve_detailed(url).await.result
    }

    pub async fn resolve_detailed(&self, url: &str) -> Resolution {
        let request = ResolutionRequest::new(url);
        let mut state = State::Fetching;

        loop {
            state = match state {
                State::Fetching => match self.fetcher.fetch(request.as_str()).await {
                    FetchOutcome::Body { bytes, truncated } => {
                        if truncated {
                            debug!("Body of {} truncated at {} bytes", request.as_str(), bytes.len());
                        }
                        State::Extracting(bytes)
                    }
                    FetchOutcome::RedirectLoop => State::FallbackNeeded(FallbackReason::RedirectLoop),
                    FetchOutcome::NetworkError => State::FallbackNeeded(FallbackReason::NetworkError),
                    FetchOutcome::Timeout => State::FallbackNeeded(FallbackReason::Timeout),
                    FetchOutcome::MalformedInput => {
                        State::FallbackNeeded(FallbackReason::MalformedInput)
                    }
                },
                State::Extracting(bytes) => {
                    let body = String::from_utf8_lossy(&bytes);
                    match self.pipeline.extract(&body) {
                        Some(extracted) => {
                            State::Done(Resolution::extracted(extracted.strategy, extracted.title))
                        }
                        None => State::FallbackNeeded(FallbackReason::NoTitleFound),
                    }
                }
                State::FallbackNeeded(reason) => {
                    warn!("Falling back to URL heuristic for {}: {}", request.as_str(), reason);
                    self.fallback(request.as_str())
                }
                State::Done(resolution) => {
                    info!(
                        url = request.as_str(),
                        success = resolution.result.success,
                        source = %resolution.source,
                        "resolved title"
                    );
                    return resolution;
                }
            };
        }
    }

    fn fallback(&self, url: &str) -> State {
        State::Done(self.heuristic(url))
    }

    /// URL heuristic alone, cleaned like an extracted title.
    pub fn heuristic(&self, url: &str) -> Resolution {
        title_from_url(url)
            .and_then(|title| self.pipeline.cleaner().clean(&title))
            .map(Resolution::heuristic)
            .unwrap_or_else(Resolution::failed)
    }
}

/// Resolve with default settings. Never fails; an unusable HTTP client
/// degrades to the URL heuristic.
pub async fn resolve_title(url: &str) -> ResolutionResult {
    match TitleResolver::from_config(&Config::default()) {
        Ok(resolver) => resolver.resolve(url).await,
        Err(e) => {
            error!("Could not build HTTP client: {}", e);
            title_from_url(url)
                .map(ResolutionResult::found)
                .unwrap_or_else(ResolutionResult::failed)
        }
    }
}
