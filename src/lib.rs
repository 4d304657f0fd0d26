//! # linklabel
//!
//! Short, human-readable titles for links.
//!
//! ## Architecture
//!
//! ```text
//! URL → Fetcher → Extraction pipeline → title
//!          │               │
//!          └── failure ────┴──▶ URL heuristic → title | nothing
//! ```
//!
//! - [`fetcher`]: bounded-redirect HTTP fetch with a capped, streamed body
//! - [`extract`]: HTML parsing and prioritized title strategies
//! - [`resolver`]: orchestration and the network-free URL heuristic
//!
//! ## Quick Start
//!
//! ```bash
//! linklabel resolve github.com/rust-lang/rust https://blog.rust-lang.org
//! linklabel fallback docs.google.com/spreadsheets/d/abc
//! linklabel extract page.html
//! ```
//!
//! ```rust,ignore
//! let result = linklabel::resolve_title("example.com").await;
//! if result.success {
//!     println!("{}", result.title.unwrap());
//! }
//! ```

/// Application context and error types.
pub mod app;

/// Command-line interface using clap.
///
/// - `resolve <urls>...` - Resolve titles, optionally as JSON
/// - `fallback <url>` - URL heuristic only
/// - `extract <file>` - Extraction pipeline only
/// - `config` - Show effective settings
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/linklabel/config.toml`.
pub mod config;

/// Request and result types handed across the public API.
pub mod domain;

/// Title extraction from HTML bodies.
pub mod extract;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for fetching a URL
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Title resolution.
///
/// - [`TitleResolver`](resolver::TitleResolver): fetch, extract, fall back
/// - [`ParallelResolver`](resolver::ParallelResolver): many URLs with a semaphore
pub mod resolver;

pub use domain::{ResolutionRequest, ResolutionResult};
pub use resolver::{resolve_title, TitleResolver};
