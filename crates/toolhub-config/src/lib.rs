//! # Toolhub Configuration Library
//!
//! Typed configuration for the toolhub catalog service.
//!
//! Configuration is resolved in three steps:
//!
//! 1. Built-in defaults (every section implements `Default`)
//! 2. A TOML file (`~/.config/toolhub/config.toml` or an explicit path)
//! 3. `TOOLHUB_*` environment variables
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use toolhub_config::AppConfig;
//!
//! let config = AppConfig::load(None)?;
//! println!("listening on {}:{}", config.server.host, config.server.port);
//! # Ok::<(), toolhub_config::ConfigError>(())
//! ```

#![warn(clippy::all)]

pub mod components;
mod error;
mod loader;

pub use components::*;
pub use error::ConfigError;
pub use loader::{default_config_path, AppConfig, ENV_PREFIX};
