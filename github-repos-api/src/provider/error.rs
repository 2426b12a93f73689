//! Provider construction error types.

use thiserror::Error;

/// Errors that can occur while building a provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API base URI could not be parsed.
    #[error("Invalid GitHub API URL '{uri}': {source}")]
    InvalidBaseUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),
}
