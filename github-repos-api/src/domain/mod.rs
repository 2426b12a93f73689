//! Request and response types of the repository API.
//!
//! Requests enter through [`CreateRepoRequest`] and only reach GitHub once
//! they have been turned into a [`ValidRequest`]. Outcomes leave as a
//! [`CreatedRepo`] for the single-item path, or as a [`BatchResponse`] of
//! [`CreationResult`]s for the batch path.

mod request;
mod response;

pub use request::{CreateRepoRequest, ValidRequest, INVALID_REPOSITORY_NAME};
pub use response::{BatchResponse, CreatedRepo, CreationResult};
