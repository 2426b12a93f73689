//! Per-item processing shared by the single and batch paths.

use crate::domain::{CreateRepoRequest, CreatedRepo, CreationResult};
use crate::errors::ApiError;
use crate::provider::RepoProvider;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tracing::{error, info, info_span, Instrument};

/// Message reported for an item whose task died before producing an outcome.
pub(crate) const TASK_FAILED_MESSAGE: &str = "repository creation task failed";

/// Validates `request` and, if valid, asks the provider to create it.
///
/// Invalid requests never reach the provider.
pub(crate) async fn create_single(
    provider: &dyn RepoProvider,
    request: &CreateRepoRequest,
) -> Result<CreatedRepo, ApiError> {
    let valid = request.validate()?;

    info!(repo = %valid.name(), status = "pending", "Sending request to external api");
    match provider.create_repo(&valid).await {
        Ok(repo) => {
            info!(repo = %repo.name, id = repo.id, status = "success", "Response obtained from external api");
            Ok(repo)
        }
        Err(e) => {
            error!(repo = %valid.name(), error = %e, status = "error", "Request to external api failed");
            Err(e)
        }
    }
}

/// Processes one batch item into exactly one [`CreationResult`].
///
/// Failures are returned as data; this never errors.
pub async fn process_item(provider: &dyn RepoProvider, request: &CreateRepoRequest) -> CreationResult {
    let span = info_span!("process_item", repo = %request.name.trim());
    create_single(provider, request).instrument(span).await.into()
}

/// Runs [`process_item`] and turns a panic into an error outcome, so the
/// batch still receives one result for this item.
pub(crate) async fn run_worker(
    provider: &dyn RepoProvider,
    request: CreateRepoRequest,
) -> CreationResult {
    AssertUnwindSafe(process_item(provider, &request))
        .catch_unwind()
        .await
        .unwrap_or_else(|_| {
            error!(repo = %request.name, "Repository creation task panicked");
            task_failed()
        })
}

/// Outcome standing in for an item whose task never reported back.
pub(crate) fn task_failed() -> CreationResult {
    CreationResult::Error(ApiError::internal_server_error(TASK_FAILED_MESSAGE))
}
