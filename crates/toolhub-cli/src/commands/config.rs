use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use toolhub_config::{default_config_path, AppConfig};

use crate::cli::ConfigCommands;

/// Execute config subcommand
pub fn execute(cmd: ConfigCommands, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Show { format } => show(config_path, &format),
        ConfigCommands::Path => {
            let path = config_path
                .map(Path::to_path_buf)
                .or_else(default_config_path)
                .context("Could not determine config file path")?;
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Init { path, force } => {
            let target = path
                .or_else(|| config_path.map(Path::to_path_buf))
                .or_else(default_config_path)
                .context("Could not determine config file path")?;
            init(&target, force)
        }
    }
}

fn show(config_path: Option<&Path>, format: &str) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    let rendered = match format {
        "json" => serde_json::to_string_pretty(&config)?,
        _ => config.to_toml_string()?,
    };
    println!("{}", rendered);
    Ok(())
}

/// Returns whether a file was written
pub(crate) fn write_default(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, AppConfig::default().to_toml_string()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

fn init(path: &Path, force: bool) -> Result<()> {
    if !write_default(path, force)? {
        println!(
            "{} Config file already exists at: {}",
            "Error:".red().bold(),
            path.display()
        );
        println!("Use {} to overwrite", "--force".yellow());
        return Ok(());
    }

    println!(
        "{} Created config file at: {}",
        "Success:".green().bold(),
        path.display()
    );
    println!(
        "{}",
        "Set backend.url and backend.anon_key to connect to your project.".dimmed()
    );
    Ok(())
}
