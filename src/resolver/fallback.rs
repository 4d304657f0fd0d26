//! Titles derived from URL structure alone. No I/O.

use tracing::debug;
use url::Url;

use crate::fetcher::normalize_url;

/// Derive a label from the URL's host and path, or `None` if the input is
/// not a URL with a host of at least two labels.
pub fn title_from_url(input: &str) -> Option<String> {
    let url = normalize_url(input).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();

    if host.contains("docs.google.com") {
        return Some(google_docs_label(url.path()).to_string());
    }

    if host.contains("confluence") {
        if let Some(page_id) = confluence_page_id(&url) {
            debug!(page_id = %page_id, "Confluence page link");
        }
        return Some("Confluence".to_string());
    }

    if host.contains("github.com") {
        return Some(github_label(&url));
    }

    domain_label(&host)
}

fn google_docs_label(path: &str) -> &'static str {
    if path.starts_with("/spreadsheets") {
        "Google Sheet"
    } else if path.starts_with("/presentation") {
        "Google Slides"
    } else {
        "Google Doc"
    }
}

/// Page id from `/pages/<id>` or `?pageId=<id>` links.
fn confluence_page_id(url: &Url) -> Option<String> {
    let from_query = url
        .query_pairs()
        .find(|(key, _)| key == "pageId")
        .map(|(_, value)| value.into_owned());

    let from_path = || {
        let mut segments = url.path_segments()?;
        segments.find(|segment| *segment == "pages")?;
        segments.next().map(str::to_string)
    };

    from_query
        .or_else(from_path)
        .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()))
}

/// `org/repo` when the path names a repository, `GitHub` otherwise.
fn github_label(url: &Url) -> String {
    let segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    match segments.as_slice() {
        [org, repo, ..] => format!("{}/{}", org, repo),
        _ => "GitHub".to_string(),
    }
}

/// Second-to-last label of the host with its first character uppercased:
/// `www.example.com` → `Example`.
fn domain_label(host: &str) -> Option<String> {
    let host = host.strip_prefix("www.").unwrap_or(host);
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    if labels.len() < 2 {
        return None;
    }
    capitalize_first(labels[labels.len() - 2])
}

fn capitalize_first(label: &str) -> Option<String> {
    let mut chars = label.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
