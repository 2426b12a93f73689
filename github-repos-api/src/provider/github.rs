//! GitHub implementation of [`RepoProvider`] backed by octocrab.

use super::error::ProviderError;
use super::payload::{GitHubCreateRepoRequest, GitHubCreateRepoResponse};
use super::RepoProvider;
use crate::domain::{CreatedRepo, ValidRequest};
use crate::errors::ApiError;
use async_trait::async_trait;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use tracing::{debug, error, info_span, warn, Instrument};
use url::Url;

/// Public GitHub API endpoint.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Message reported when GitHub cannot be reached or its answer is unusable.
pub const TRANSPORT_ERROR_MESSAGE: &str = "error when trying to create github repository";

/// Route creating a repository owned by the authenticated user.
const CREATE_REPO_ROUTE: &str = "/user/repos";

/// Creates repositories through the GitHub REST API.
///
/// The access token is fixed at construction and shared read-only by every
/// concurrent call.
#[derive(Debug, Clone)]
pub struct GitHubProvider {
    octocrab: Octocrab,
}

impl GitHubProvider {
    /// Builds a provider talking to the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the HTTP client cannot be built.
    pub fn new(token: impl Into<String>) -> Result<Self, ProviderError> {
        Self::with_base_uri(token, GITHUB_API_URL)
    }

    /// Builds a provider talking to a custom API endpoint, e.g. GitHub
    /// Enterprise.
    ///
    /// Requests are sent once and never retried.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if `base_uri` is not a valid URL or the HTTP
    /// client cannot be built.
    pub fn with_base_uri(token: impl Into<String>, base_uri: &str) -> Result<Self, ProviderError> {
        Url::parse(base_uri).map_err(|source| ProviderError::InvalidBaseUri {
            uri: base_uri.to_string(),
            source,
        })?;

        let octocrab = Octocrab::builder()
            .personal_token(token.into())
            .base_uri(base_uri)?
            .add_retry_config(RetryConfig::None)
            .build()?;
        Ok(Self { octocrab })
    }
}

#[async_trait]
impl RepoProvider for GitHubProvider {
    async fn create_repo(&self, request: &ValidRequest) -> Result<CreatedRepo, ApiError> {
        let span = info_span!("github_create_repo", repo = %request.name());
        let body = GitHubCreateRepoRequest::from(request);

        async {
            debug!(route = CREATE_REPO_ROUTE, "Sending create repository request");

            let response: GitHubCreateRepoResponse = self
                .octocrab
                .post(CREATE_REPO_ROUTE, Some(&body))
                .await
                .map_err(to_api_error)?;

            debug!(id = response.id, "GitHub created repository");
            Ok(response.into())
        }
        .instrument(span)
        .await
    }
}

/// Maps an octocrab failure onto the common error shape.
///
/// Rejections keep GitHub's status and message; everything else becomes a
/// generic server error.
fn to_api_error(error: octocrab::Error) -> ApiError {
    match error {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code.as_u16();
            warn!(status, message = %source.message, "GitHub rejected request");
            ApiError::new(status, source.message.clone())
        }
        other => {
            error!(error = %other, "Error when trying to create new repo in github");
            ApiError::internal_server_error(TRANSPORT_ERROR_MESSAGE)
        }
    }
}
