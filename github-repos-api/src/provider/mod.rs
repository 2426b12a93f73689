//! Remote repository providers.
//!
//! The service only talks to GitHub through the [`RepoProvider`] trait, so
//! tests and alternative backends can be plugged in without a global client.

mod error;
mod github;
mod payload;

pub use error::ProviderError;
pub use github::{GitHubProvider, GITHUB_API_URL, TRANSPORT_ERROR_MESSAGE};
pub use payload::{GitHubCreateRepoRequest, GitHubCreateRepoResponse, GitHubOwner};

use crate::domain::{CreatedRepo, ValidRequest};
use crate::errors::ApiError;
use async_trait::async_trait;

/// Creates a single repository on a remote service.
///
/// Implementations own their credentials. A call blocks the calling task
/// until the remote service answered or the transport failed.
#[async_trait]
pub trait RepoProvider: Send + Sync {
    /// Creates the repository described by `request`.
    ///
    /// # Errors
    ///
    /// Returns the remote status and message unchanged when the remote
    /// service rejects the request, or a `500` [`ApiError`] when it cannot be
    /// reached or its answer cannot be decoded.
    async fn create_repo(&self, request: &ValidRequest) -> Result<CreatedRepo, ApiError>;
}
