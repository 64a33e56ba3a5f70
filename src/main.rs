//! Contact Directory - Main entry point
//!
//! Runs the contact directory as an MCP server over stdio.

use anyhow::Result;
use contact_directory::repositories::{ContactRepository, InMemoryContactRepository};
use contact_directory::services::{ContactService, ContactServiceImpl};
use contact_directory::{Config, ContactDirectoryServer, EmailValidator, MetricsTracker};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let default_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Initialize the record store
    let repository = InMemoryContactRepository::from_config(&config).await?;
    info!(
        contacts = repository.len().await,
        snapshot = ?config.data_file,
        "Contact store ready"
    );
    let repository = Arc::new(repository) as Arc<dyn ContactRepository>;

    let metrics = MetricsTracker::new();
    let validator = EmailValidator::from_config(&config).with_metrics(metrics.clone());
    info!(
        "Email validation budgets: domain {} ms, pattern {} ms",
        config.email_domain_timeout_ms, config.email_pattern_timeout_ms
    );

    let service =
        Arc::new(ContactServiceImpl::new(repository, validator)) as Arc<dyn ContactService>;
    let server = ContactDirectoryServer::new(service);

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    contact_directory::server::run_server(server).await?;

    info!("{}", metrics.summary());
    info!("Contact directory shutdown complete");
    Ok(())
}
