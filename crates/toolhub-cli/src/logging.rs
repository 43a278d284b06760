//! Tracing subscriber setup from `[logging]`

use toolhub_config::{LogFormat, LoggingConfig};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins, then a CLI level, then the configured directive
pub fn env_filter(config: &LoggingConfig, level: Option<LevelFilter>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let directive = match level {
        Some(level) => level.to_string().to_lowercase(),
        None => config.level.clone(),
    };
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init(config: &LoggingConfig, level: Option<LevelFilter>) {
    let filter = env_filter(config, level);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // try_init: tests may install a subscriber first
    let _ = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Text => builder.with_target(false).try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cli_level_overrides_config() {
        std::env::remove_var("RUST_LOG");
        let config = LoggingConfig::default();
        let filter = env_filter(&config, Some(LevelFilter::TRACE));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));

        let filter = env_filter(&config, None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    #[serial]
    fn test_bad_directive_falls_back_to_info() {
        std::env::remove_var("RUST_LOG");
        let config = LoggingConfig {
            level: "toolhub=loud".to_string(),
            ..Default::default()
        };
        assert_eq!(
            env_filter(&config, None).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }
}
