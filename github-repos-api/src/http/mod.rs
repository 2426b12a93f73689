//! HTTP controller layer.
//!
//! Routes:
//! - `POST /repo` creates one repository.
//! - `POST /repos` creates a batch of repositories.
//! - `GET /marco` answers `polo`.

mod polo;
mod repositories;

pub use polo::marco;
pub use repositories::{create_repo, create_repos};

use crate::config::AppConfig;
use crate::errors::ApiError;
use crate::service::RepositoryService;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};
use tracing::info;

/// Registers every route of the API.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/repo", web::post().to(create_repo))
        .route("/repos", web::post().to(create_repos))
        .route("/marco", web::get().to(marco))
        .default_service(web::route().to(route_not_found));
}

/// Binds `config.host:config.port` and serves the API until shutdown.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn run_server(config: &AppConfig, service: RepositoryService) -> std::io::Result<()> {
    let bind_addr = format!("{}:{}", config.host, config.port);
    let service = web::Data::new(service);

    info!(address = %bind_addr, "Starting HTTP server");
    HttpServer::new(move || App::new().app_data(service.clone()).configure(configure_routes))
        .bind(&bind_addr)?
        .run()
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Renders an [`ApiError`] with its own status.
pub(crate) fn error_response(error: &ApiError) -> HttpResponse {
    HttpResponse::build(status_code(error.status())).json(error)
}

/// Converts a raw status, falling back to `500` for values HTTP rejects.
pub(crate) fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn route_not_found() -> HttpResponse {
    error_response(&ApiError::not_found("route not found"))
}
