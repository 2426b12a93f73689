//! Wire types of the GitHub `POST /user/repos` endpoint.

use crate::domain::{CreatedRepo, ValidRequest};
use serde::{Deserialize, Serialize};

/// Body sent to GitHub when creating a repository for the authenticated user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubCreateRepoRequest {
    /// Repository name.
    pub name: String,

    /// Repository description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Project homepage URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    /// Whether the repository is private.
    #[serde(default)]
    pub private: bool,

    /// Whether issues are enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,

    /// Whether projects are enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_projects: Option<bool>,

    /// Whether the wiki is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_wiki: Option<bool>,
}

impl From<&ValidRequest> for GitHubCreateRepoRequest {
    fn from(request: &ValidRequest) -> Self {
        Self {
            name: request.name().to_string(),
            description: request.description().to_string(),
            private: false,
            ..Default::default()
        }
    }
}

/// Subset of the repository GitHub returns after creation.
///
/// Missing fields decode to empty values; only `id` is required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitHubCreateRepoResponse {
    /// GitHub repository id.
    pub id: i64,

    /// Repository name.
    #[serde(default)]
    pub name: String,

    /// Repository owner.
    #[serde(default)]
    pub owner: GitHubOwner,
}

/// Owner of a GitHub repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GitHubOwner {
    /// User or organization login.
    #[serde(default)]
    pub login: String,
}

impl From<GitHubCreateRepoResponse> for CreatedRepo {
    fn from(response: GitHubCreateRepoResponse) -> Self {
        Self {
            id: response.id,
            owner: response.owner.login,
            name: response.name,
        }
    }
}
