//! Contact App - Main entry point
//!
//! Runs the contact REST API over the configured SQLite store.

use anyhow::{Context, Result};
use contact_app::repositories::{ContactRepository, SqliteContactRepository};
use contact_app::services::{ContactService, ContactServiceImpl};
use contact_app::Config;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration before logging so LOG_LEVEL can seed the filter
    let config = Config::from_env();
    let log_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

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

    let addr = config.bind_addr()?;

    info!("Opening contact store at {}", config.database_path());
    let repository = SqliteContactRepository::open(config.database_path())
        .with_context(|| format!("Failed to open contact store {}", config.database_path()))?;
    let repository = Arc::new(repository) as Arc<dyn ContactRepository>;

    let service = Arc::new(ContactServiceImpl::new(repository)) as Arc<dyn ContactService>;

    info!("Starting contact API on {}", addr);
    contact_app::server::run_server(addr, service).await?;

    info!("Contact API shutdown complete");
    Ok(())
}
