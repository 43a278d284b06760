use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "toolhub")]
#[command(about = "toolhub - browse, search and serve a catalog of AI tools")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    /// If not specified, uses the config file value
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/toolhub/config.toml)
    #[arg(short = 'C', long, global = true, env = "TOOLHUB_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Explicit level from the flags, if any; `--log-level` wins over `-v`
    pub fn level_override(&self) -> Option<LevelFilter> {
        match (self.log_level, self.verbose) {
            (Some(level), _) => Some(level.into()),
            (None, true) => Some(LevelFilter::DEBUG),
            (None, false) => None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API and static frontend
    Serve {
        /// Bind host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory with the built frontend (overrides config)
        #[arg(long)]
        static_dir: Option<String>,

        /// Use an in-process backend seeded with the built-in catalog
        #[arg(long)]
        offline: bool,

        /// Create an admin account in the offline backend
        #[arg(long, requires_all = ["offline", "admin_password"])]
        admin_email: Option<String>,

        /// Password for --admin-email
        #[arg(long, env = "TOOLHUB_ADMIN_PASSWORD", requires = "admin_email", hide_env_values = true)]
        admin_password: Option<String>,
    },

    /// Search the catalog by name, description or tag
    Search {
        /// Free-text query (empty lists everything)
        query: Option<String>,

        /// Restrict to one category ("all" for no restriction)
        #[arg(short = 'c', long)]
        category: Option<String>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Read the built-in catalog even when the backend is configured
        #[arg(long)]
        offline: bool,
    },

    /// List categories with tool counts
    Categories {
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        #[arg(long)]
        offline: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration (file, env and defaults)
    Show {
        /// Output format (toml, json)
        #[arg(short = 'f', long, default_value = "toml")]
        format: String,
    },

    /// Print the default config file location
    Path,

    /// Write a config file with default values
    Init {
        /// Target path (defaults to the standard location)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
