//! Repository creation, one at a time or as a concurrent batch.
//!
//! A batch fans out one tokio task per item. Each task sends exactly one
//! [`CreationResult`] into an aggregation channel that a single collector
//! task drains; awaiting the collector is the barrier telling the caller
//! that every item reported back.

mod collector;
mod status;
mod worker;

pub use status::compute_status;
pub use worker::process_item;

use crate::domain::{BatchResponse, CreateRepoRequest, CreatedRepo, CreationResult};
use crate::errors::ApiError;
use crate::provider::RepoProvider;
use collector::collect_results;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{error, info, info_span, warn, Instrument};
use worker::{create_single, run_worker, task_failed};

/// Creates repositories through an injected [`RepoProvider`].
#[derive(Clone)]
pub struct RepositoryService {
    provider: Arc<dyn RepoProvider>,
    concurrency: Option<usize>,
}

impl RepositoryService {
    /// Creates a service with unbounded batch concurrency.
    pub fn new(provider: Arc<dyn RepoProvider>) -> Self {
        Self {
            provider,
            concurrency: None,
        }
    }

    /// Caps the number of provider calls a single batch has in flight.
    ///
    /// `None` keeps one in-flight call per item. A cap of zero is ignored.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: Option<usize>) -> Self {
        self.concurrency = concurrency.filter(|&limit| limit > 0);
        self
    }

    /// Returns the configured batch concurrency cap.
    pub fn concurrency(&self) -> Option<usize> {
        self.concurrency
    }

    /// Creates a single repository.
    ///
    /// # Errors
    ///
    /// Returns a `400` [`ApiError`] for an invalid name, or the provider's
    /// error unchanged.
    pub async fn create_repo(&self, request: CreateRepoRequest) -> Result<CreatedRepo, ApiError> {
        create_single(self.provider.as_ref(), &request).await
    }

    /// Creates every repository in `requests` concurrently.
    ///
    /// Always returns one outcome per request; individual failures are
    /// reported inside [`BatchResponse::results`], in completion order.
    pub async fn create_repos(&self, requests: Vec<CreateRepoRequest>) -> BatchResponse {
        let expected = requests.len();
        let span = info_span!("create_repos", batch_size = expected);

        async move {
            info!("Dispatching repository batch");

            let (sender, receiver) = mpsc::channel::<CreationResult>(expected.max(1));
            let collector = tokio::spawn(collect_results(receiver, expected).in_current_span());
            let limiter = self.concurrency.map(|limit| Arc::new(Semaphore::new(limit)));

            for request in requests {
                let provider = Arc::clone(&self.provider);
                let sender = sender.clone();
                let limiter = limiter.clone();

                tokio::spawn(
                    async move {
                        let _permit = match limiter {
                            Some(limiter) => limiter.acquire_owned().await.ok(),
                            None => None,
                        };

                        let outcome = run_worker(provider.as_ref(), request).await;
                        if sender.send(outcome).await.is_err() {
                            warn!("Collector stopped before outcome was delivered");
                        }
                    }
                    .in_current_span(),
                );
            }

            // Workers hold the remaining senders; the channel closes once all of them finished.
            drop(sender);

            let results = collector.await.unwrap_or_else(|e| {
                error!(error = %e, "Result collector failed");
                std::iter::repeat_with(task_failed).take(expected).collect()
            });

            let status_code = compute_status(&results, expected);
            let response = BatchResponse {
                status_code,
                results,
            };

            info!(
                status_code,
                successes = response.successes(),
                failures = response.failures(),
                "Batch complete"
            );
            response
        }
        .instrument(span)
        .await
    }
}
