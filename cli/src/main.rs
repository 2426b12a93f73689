//! CLI for the GitHub repository API.
//!
//! Runs the HTTP server, or creates a batch of repositories from a JSON file
//! and prints the batch response.

use clap::{Parser, Subcommand};
use github_repos_api::{
    run_server, AppConfig, BatchResponse, CreateRepoRequest, GitHubProvider,
    ProviderError, RepositoryService, STATUS_CREATED,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// GitHub Repos API - create GitHub repositories one at a time or in batches.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GitHub Personal Access Token.
    #[arg(long, env = "SECRET_GITHUB_ACCESS_TOKEN", hide_env_values = true)]
    token: String,

    /// Path to the config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API.
    Serve {
        /// Address to bind, overrides the config file.
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overrides the config file.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Create every repository listed in a JSON file.
    Batch {
        /// JSON array of `{"name": .., "description": ..}` objects.
        #[arg(long)]
        input: PathBuf,

        /// Maximum concurrent GitHub requests, overrides the config file.
        #[arg(long)]
        concurrency: Option<usize>,
    },
}

/// Errors that abort the CLI.
#[derive(Debug, Error)]
enum CliError {
    /// GitHub client initialization errors.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Failed to read the batch input.
    #[error("Failed to read input '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Batch input is not a list of requests.
    #[error("Failed to parse input '{path}': {source}")]
    Input {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to render the batch response.
    #[error("Failed to render response: {0}")]
    Output(#[source] serde_json::Error),

    /// HTTP server errors.
    #[error("HTTP server error: {0}")]
    Server(#[source] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Pick up SECRET_GITHUB_ACCESS_TOKEN and friends from .env, if present
    let _ = dotenvy::dotenv();

    // Parse arguments
    let args = Args::parse();

    // Load configuration before tracing, as it may carry the log level
    let config = AppConfig::load_or_default(args.config.as_deref());
    init_tracing(config.as_ref().ok().and_then(|c| c.log_level.as_deref()));

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::from(2);
        }
    };

    // octocrab uses rustls; make aws-lc-rs the process-wide crypto provider
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    match run(args, config).await {
        Ok(None) => ExitCode::from(0),
        Ok(Some(response)) => {
            if response.status_code == STATUS_CREATED {
                ExitCode::from(0)
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG`, then the configured level, then "info"
fn init_tracing(configured_level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured_level.unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(filter)
        .init();
}

/// Main execution logic. Returns the batch response for `batch` runs.
async fn run(args: Args, mut config: AppConfig) -> Result<Option<BatchResponse>, CliError> {
    match args.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            let service = build_service(&args.token, &config)?;
            run_server(&config, service)
                .await
                .map_err(CliError::Server)?;
            Ok(None)
        }
        Command::Batch { input, concurrency } => {
            if concurrency.is_some() {
                config.concurrency = concurrency;
            }

            let requests = read_requests(&input)?;
            let service = build_service(&args.token, &config)?;

            info!(count = requests.len(), path = %input.display(), "Creating repositories");
            let response = service.create_repos(requests).await;

            let rendered = serde_json::to_string_pretty(&response).map_err(CliError::Output)?;
            println!("{rendered}");
            Ok(Some(response))
        }
    }
}

/// Builds the repository service for the configured GitHub endpoint.
fn build_service(token: &str, config: &AppConfig) -> Result<RepositoryService, CliError> {
    let provider = GitHubProvider::with_base_uri(token, config.github_api_url())?;
    let service = RepositoryService::new(Arc::new(provider)).with_concurrency(config.concurrency);
    info!(
        api = %config.github_api_url(),
        concurrency = ?service.concurrency(),
        "GitHub client ready"
    );
    Ok(service)
}

/// Reads a batch of requests from a JSON file.
fn read_requests(path: &Path) -> Result<Vec<CreateRepoRequest>, CliError> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| CliError::Input {
        path: path.display().to_string(),
        source: e,
    })
}
