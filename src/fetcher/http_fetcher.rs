use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, LOCATION};
use reqwest::{redirect, Client, Response, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::app::{LinkLabelError, Result};
use crate::fetcher::{
    normalize_url, resolve_location, AttemptOutcome, FetchAttempt, FetchConfig, FetchOutcome,
    Fetcher,
};

const REDIRECT_STATUSES: [StatusCode; 4] = [
    StatusCode::MOVED_PERMANENTLY,
    StatusCode::FOUND,
    StatusCode::TEMPORARY_REDIRECT,
    StatusCode::PERMANENT_REDIRECT,
];

/// reqwest-based fetcher that follows redirects itself so the hop bound and
/// the body cap are enforced per resolution.
pub struct HttpFetcher {
    client: Client,
    max_redirects: usize,
    max_body_bytes: usize,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let accept = HeaderValue::from_str(&config.accept)
            .map_err(|e| LinkLabelError::Other(format!("Invalid accept header: {}", e)))?;
        headers.insert(ACCEPT, accept);

        let mut builder = Client::builder();
        if !config.system_proxy {
            builder = builder.no_proxy();
        }

        let client = builder
            .timeout(config.timeout())
            .redirect(redirect::Policy::none())
            .pool_max_idle_per_host(0)
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            max_redirects: config.max_redirects,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Follow the chain starting at `start`. Each response is owned by its
    /// loop iteration, so the connection is released before the next hop
    /// and on every return.
    async fn follow(&self, start: Url) -> FetchOutcome {
        let mut url = start;
        let mut hop = 0;

        loop {
            if hop > self.max_redirects {
                warn!("Giving up on {} after {} redirects", url, self.max_redirects);
                return FetchOutcome::RedirectLoop;
            }

            let response = match self.client.get(url.clone()).send().await {
                Ok(response) => response,
                Err(e) => {
                    log_attempt(&url, hop, AttemptOutcome::Error(e.to_string()));
                    return classify(&e);
                }
            };

            if let Some(location) = redirect_location(&response) {
                let next = match resolve_location(&url, &location) {
                    Ok(next) => next,
                    Err(e) => {
                        log_attempt(&url, hop, AttemptOutcome::Error(e.to_string()));
                        return FetchOutcome::NetworkError;
                    }
                };
                log_attempt(&url, hop, AttemptOutcome::Redirect(next.clone()));
                drop(response);
                url = next;
                hop += 1;
                continue;
            }

            return match read_capped(response, self.max_body_bytes).await {
                Ok((bytes, truncated)) => {
                    log_attempt(
                        &url,
                        hop,
                        AttemptOutcome::Body {
                            len: bytes.len(),
                            truncated,
                        },
                    );
                    FetchOutcome::Body { bytes, truncated }
                }
                Err(e) => {
                    log_attempt(&url, hop, AttemptOutcome::Error(e.to_string()));
                    classify(&e)
                }
            };
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        match normalize_url(url) {
            Ok(start) => self.follow(start).await,
            Err(e) => {
                debug!("Cannot parse {:?} as a URL: {}", url, e);
                FetchOutcome::MalformedInput
            }
        }
    }
}

/// `Location` of a followable redirect, if this response is one.
fn redirect_location(response: &Response) -> Option<String> {
    if !REDIRECT_STATUSES.contains(&response.status()) {
        return None;
    }
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map(str::to_owned)
}

/// Read at most `cap` bytes. Exceeding the cap drops the response
/// mid-stream, which aborts the transfer.
async fn read_capped(
    mut response: Response,
    cap: usize,
) -> std::result::Result<(Vec<u8>, bool), reqwest::Error> {
    let mut body = Vec::new();

    while let Some(chunk) = response.chunk().await? {
        body.extend_from_slice(&chunk);
        if body.len() > cap {
            body.truncate(cap);
            return Ok((body, true));
        }
    }

    Ok((body, false))
}

fn classify(error: &reqwest::Error) -> FetchOutcome {
    if error.is_timeout() {
        FetchOutcome::Timeout
    } else {
        FetchOutcome::NetworkError
    }
}

fn log_attempt(url: &Url, hop: usize, outcome: AttemptOutcome) {
    let attempt = FetchAttempt {
        url: url.clone(),
        hop,
        outcome,
    };
    debug!(url = %attempt.url, hop = attempt.hop, outcome = ?attempt.outcome, "fetch attempt");
}
