use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::warn;

use crate::domain::Resolution;
use crate::resolver::TitleResolver;

pub const DEFAULT_WORKERS: usize = 10;

/// Resolves many URLs at once with a bounded number in flight.
pub struct ParallelResolver {
    resolver: Arc<TitleResolver>,
    semaphore: Arc<Semaphore>,
    deadline: Option<Duration>,
}

impl ParallelResolver {
    pub fn new(resolver: Arc<TitleResolver>) -> Self {
        Self::with_workers(resolver, DEFAULT_WORKERS)
    }

    pub fn with_workers(resolver: Arc<TitleResolver>, workers: usize) -> Self {
        Self {
            resolver,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
            deadline: None,
        }
    }

    /// Stop waiting on any single fetch after `deadline` and label that URL
    /// by the heuristic alone.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Results come back in the order of `urls`.
    pub async fn resolve_all(&self, urls: Vec<String>) -> Vec<(String, Resolution)> {
        let mut handles = Vec::new();

        for url in urls {
            let resolver = self.resolver.clone();
            let semaphore = self.semaphore.clone();
            let deadline = self.deadline;
            let task_url = url.clone();

            let handle = tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire().await else {
                    return Resolution::failed();
                };
                resolve_within(&resolver, &task_url, deadline).await
            });

            handles.push((url, handle));
        }

        let mut results = Vec::new();
        for (url, handle) in handles {
            match handle.await {
                Ok(resolution) => results.push((url, resolution)),
                Err(e) => {
                    tracing::error!("Task join error: {}", e);
                    results.push((url, Resolution::failed()));
                }
            }
        }

        results
    }
}

async fn resolve_within(
    resolver: &TitleResolver,
    url: &str,
    deadline: Option<Duration>,
) -> Resolution {
    let Some(deadline) = deadline else {
        return resolver.resolve_detailed(url).await;
    };

    match tokio::time::timeout(deadline, resolver.resolve_detailed(url)).await {
        Ok(resolution) => resolution,
        Err(_) => {
            warn!("Resolution of {} exceeded {:?}", url, deadline);
            resolver.heuristic(url)
        }
    }
}
