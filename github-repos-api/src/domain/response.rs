//! Outcomes returned to API callers.

use crate::errors::ApiError;
use serde::{Deserialize, Serialize};

/// A repository that GitHub created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRepo {
    /// GitHub repository id.
    pub id: i64,

    /// Login of the repository owner.
    pub owner: String,

    /// Repository name.
    pub name: String,
}

/// Outcome of a single item of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationResult {
    /// The repository was created.
    #[serde(rename = "repo")]
    Response(CreatedRepo),

    /// Validation or GitHub rejected the item.
    Error(ApiError),
}

impl CreationResult {
    /// Returns true if the repository was created.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Response(_))
    }

    /// The created repository, if any.
    #[must_use]
    pub fn repo(&self) -> Option<&CreatedRepo> {
        match self {
            Self::Response(repo) => Some(repo),
            Self::Error(_) => None,
        }
    }

    /// The error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Response(_) => None,
            Self::Error(error) => Some(error),
        }
    }
}

impl From<Result<CreatedRepo, ApiError>> for CreationResult {
    fn from(result: Result<CreatedRepo, ApiError>) -> Self {
        match result {
            Ok(repo) => Self::Response(repo),
            Err(error) => Self::Error(error),
        }
    }
}

/// Response of a batch creation.
///
/// `results` holds one entry per input item, in the order the items
/// finished. It does not follow input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    /// Aggregate status of the whole batch.
    pub status_code: u16,

    /// Per-item outcomes in arrival order.
    pub results: Vec<CreationResult>,
}

impl BatchResponse {
    /// Number of created repositories.
    #[must_use]
    pub fn successes(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Number of failed items.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.results.len() - self.successes()
    }
}
