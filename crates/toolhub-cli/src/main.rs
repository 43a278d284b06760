use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use toolhub_cli::cli::{Cli, Commands};
use toolhub_cli::{commands, logging};
use toolhub_config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = cli.level_override();

    match cli.command {
        // Config commands must work even when the config file is broken
        Commands::Config(cmd) => commands::config::execute(cmd, cli.config.as_deref()),
        command => {
            let config =
                AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
            logging::init(&config.logging, level);
            debug!("Effective config: {:?}", config);
            commands::run(command, config).await
        }
    }
}
