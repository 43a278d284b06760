pub mod config;
pub mod search;
pub mod serve;

use crate::cli::Commands;
use anyhow::{Context, Result};
use toolhub_backend::SupabaseClient;
use toolhub_config::{AppConfig, CatalogSource};
use toolhub_core::{sample_catalog, CatalogRepository, CatalogStore};
use tracing::info;

/// Dispatch every subcommand that needs a loaded configuration
pub async fn run(command: Commands, config: AppConfig) -> Result<()> {
    match command {
        Commands::Serve {
            host,
            port,
            static_dir,
            offline,
            admin_email,
            admin_password,
        } => {
            let admin = admin_email.zip(admin_password);
            serve::execute(config, host, port, static_dir, offline, admin).await
        }
        Commands::Search {
            query,
            category,
            format,
            offline,
        } => search::execute(config, query, category, format, offline).await,
        Commands::Categories { format, offline } => {
            search::categories(config, format, offline).await
        }
        Commands::Config(_) => Ok(()),
    }
}

/// The catalog a read-only command works over: the built-in tools, or the
/// backend table when `catalog.source = "backend"`
pub(crate) async fn load_catalog(config: &AppConfig, offline: bool) -> Result<CatalogStore> {
    let tools = match (config.catalog.source, offline) {
        (CatalogSource::Backend, false) => {
            info!("Reading catalog from {}", config.backend.url);
            let client = SupabaseClient::new(&config.backend)?;
            client
                .list_tools()
                .await
                .context("Failed to load tools from backend")?
        }
        _ => sample_catalog(),
    };
    Ok(CatalogStore::new(tools)?)
}
