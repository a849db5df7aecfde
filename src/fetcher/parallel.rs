use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use tokio::time::{timeout, Instant};

use crate::app::FetchError;
use crate::fetcher::Fetcher;

pub const DEFAULT_WORKERS: usize = 30;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

type Slot = Option<Result<Vec<u8>, FetchError>>;

/// Runs a batch of GETs at once and hands the bodies back in request order.
pub struct ParallelFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    semaphore: Arc<Semaphore>,
    poll_interval: Duration,
    deadline: Option<Duration>,
}

impl ParallelFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self::with_workers(fetcher, DEFAULT_WORKERS)
    }

    pub fn with_workers(fetcher: Arc<dyn Fetcher + Send + Sync>, workers: usize) -> Self {
        Self {
            fetcher,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
            poll_interval: DEFAULT_POLL_INTERVAL,
            deadline: None,
        }
    }

    /// How long each wait for the next completion lasts before logging and
    /// waiting again.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Give up on a batch after `deadline`. Unfinished slots report
    /// [`FetchError::Abandoned`].
    pub fn deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub async fn fetch_one(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.fetcher.fetch(url).await
    }

    /// Fetch every URL concurrently.
    ///
    /// Always returns one result per input URL, in input order, no matter
    /// which transfer finishes first. A failed slot does not stop the others.
    pub async fn fetch_many(&self, urls: &[String]) -> Vec<Result<Vec<u8>, FetchError>> {
        let mut slots: Vec<Slot> = urls.iter().map(|_| None).collect();
        let mut in_flight = FuturesUnordered::new();
        let mut abort_handles = Vec::with_capacity(urls.len());

        for (index, url) in urls.iter().enumerate() {
            let fetcher = self.fetcher.clone();
            let semaphore = self.semaphore.clone();
            let url = url.clone();

            let handle = tokio::spawn(async move {
                match semaphore.acquire_owned().await {
                    Ok(_permit) => fetcher.fetch(&url).await,
                    Err(_) => Err(FetchError::Task("worker pool closed".into())),
                }
            });
            abort_handles.push(handle.abort_handle());

            in_flight.push(async move { (index, handle.await) });
        }

        let started = Instant::now();
        while !in_flight.is_empty() {
            let mut wait = self.poll_interval;
            if let Some(deadline) = self.deadline {
                let remaining = deadline.saturating_sub(started.elapsed());
                if remaining.is_zero() {
                    tracing::warn!(
                        "Batch deadline of {:?} hit with {} requests in flight",
                        deadline,
                        in_flight.len()
                    );
                    abort_handles.iter().for_each(|h| h.abort());
                    break;
                }
                // Never sleep past the deadline.
                wait = wait.min(remaining);
            }

            match timeout(wait, in_flight.next()).await {
                Ok(Some((index, joined))) => {
                    let result = joined.unwrap_or_else(|e| Err(FetchError::Task(e.to_string())));
                    slots[index] = Some(result);
                }
                Ok(None) => break,
                Err(_) => {
                    tracing::debug!("{} of {} requests still in flight", in_flight.len(), urls.len());
                }
            }
        }

        slots
            .into_iter()
            .map(|slot| slot.unwrap_or(Err(FetchError::Abandoned)))
            .collect()
    }
}
