//! Repository handlers.

use super::{error_response, status_code};
use crate::domain::CreateRepoRequest;
use crate::errors::ApiError;
use crate::service::RepositoryService;
use actix_web::{web, HttpResponse};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

const INVALID_JSON_BODY: &str = "invalid json body";

/// POST /repo
///
/// Creates a single repository. Answers `201` with the created repository,
/// or the error status on failure.
pub async fn create_repo(service: web::Data<RepositoryService>, body: web::Bytes) -> HttpResponse {
    let request: CreateRepoRequest = match parse_body(&body) {
        Ok(request) => request,
        Err(e) => return error_response(&e),
    };

    match service.create_repo(request).await {
        Ok(repo) => HttpResponse::Created().json(repo),
        Err(e) => error_response(&e),
    }
}

/// POST /repos
///
/// Creates a batch of repositories. The response status is the aggregate
/// status of the batch.
pub async fn create_repos(service: web::Data<RepositoryService>, body: web::Bytes) -> HttpResponse {
    let requests: Vec<CreateRepoRequest> = match parse_body(&body) {
        Ok(requests) => requests,
        Err(e) => return error_response(&e),
    };

    info!(count = requests.len(), "Received batch creation request");
    let response = service.create_repos(requests).await;
    HttpResponse::build(status_code(response.status_code)).json(response)
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "Rejected request body");
        ApiError::bad_request(INVALID_JSON_BODY)
    })
}
