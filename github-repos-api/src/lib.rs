#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod provider;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use domain::{
    BatchResponse, CreateRepoRequest, CreatedRepo, CreationResult, ValidRequest,
    INVALID_REPOSITORY_NAME,
};
pub use errors::{
    ApiError, STATUS_BAD_REQUEST, STATUS_CREATED, STATUS_INTERNAL_SERVER_ERROR,
    STATUS_PARTIAL_CONTENT,
};
pub use http::{configure_routes, run_server};
pub use provider::{GitHubCreateRepoRequest, GitHubProvider, ProviderError, RepoProvider};
pub use service::{compute_status, process_item, RepositoryService};
