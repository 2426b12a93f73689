//! Incoming creation requests and their validation.

use crate::errors::ApiError;
use serde::{Deserialize, Serialize};

/// Message returned when a repository name is empty after trimming.
pub const INVALID_REPOSITORY_NAME: &str = "Invalid repository name";

/// A request to create one repository, as sent by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRepoRequest {
    /// Repository name. Surrounding whitespace is ignored.
    #[serde(default)]
    pub name: String,

    /// Free-form repository description.
    #[serde(default)]
    pub description: String,
}

impl CreateRepoRequest {
    /// Creates a request.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Normalizes and checks the request.
    ///
    /// The name is trimmed; the description is kept as is.
    ///
    /// # Errors
    ///
    /// Returns a `400` [`ApiError`] with [`INVALID_REPOSITORY_NAME`] when the
    /// trimmed name is empty.
    pub fn validate(&self) -> Result<ValidRequest, ApiError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ApiError::bad_request(INVALID_REPOSITORY_NAME));
        }

        Ok(ValidRequest {
            name: name.to_string(),
            description: self.description.clone(),
        })
    }
}

/// A request that passed validation. Its name is trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRequest {
    name: String,
    description: String,
}

impl ValidRequest {
    /// Trimmed repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Repository description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl From<ValidRequest> for CreateRepoRequest {
    fn from(request: ValidRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
        }
    }
}
