//! Configuration loading and environment overrides

use crate::{
    BackendConfig, CatalogConfig, CatalogSource, ConfigError, LogFormat, LoggingConfig,
    ServerConfig, StorageConfig,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Prefix shared by every environment override
pub const ENV_PREFIX: &str = "TOOLHUB_";

/// Root configuration for every toolhub component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub catalog: CatalogConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// `~/.config/toolhub/config.toml`, if a config directory exists
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("toolhub").join("config.toml"))
}

impl AppConfig {
    /// Load configuration from `path` (or the default location), then apply
    /// `TOOLHUB_*` environment overrides and validate.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file silently falls back to built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file without applying overrides
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            message: e.to_string(),
        })
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Apply overrides read through `lookup` (normally `std::env::var`)
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            let key = format!("{ENV_PREFIX}{name}");
            lookup(&key).filter(|v| !v.trim().is_empty()).map(|v| {
                debug!("Applying override from {key}");
                (key, v)
            })
        };

        if let Some((_, host)) = var("HOST") {
            self.server.host = host;
        }
        if let Some((key, port)) = var("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(key, port))?;
        }
        if let Some((_, dir)) = var("STATIC_DIR") {
            self.server.static_dir = Some(dir);
        }
        if let Some((_, url)) = var("BACKEND_URL") {
            self.backend.url = url;
        }
        if let Some((_, key)) = var("ANON_KEY") {
            self.backend.anon_key = key;
        }
        if let Some((_, site)) = var("SITE_URL") {
            self.backend.site_url = site;
        }
        if let Some((key, source)) = var("CATALOG_SOURCE") {
            self.catalog.source = source
                .parse::<CatalogSource>()
                .map_err(|_| ConfigError::invalid(key, source))?;
        }
        if let Some((_, path)) = var("PREFERENCES_PATH") {
            self.storage.preferences_path = Some(PathBuf::from(path));
        }
        if let Some((_, level)) = var("LOG") {
            self.logging.level = level;
        }
        if let Some((key, format)) = var("LOG_FORMAT") {
            self.logging.format = match format.trim().to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "text" => LogFormat::Text,
                "pretty" => LogFormat::Pretty,
                _ => return Err(ConfigError::invalid(key, format)),
            };
        }

        Ok(())
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Missing("server.host".to_string()));
        }
        if self.server.max_body_mb == 0 {
            return Err(ConfigError::invalid("server.max_body_mb", "0"));
        }

        let url = self.backend.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::invalid("backend.url", url));
        }
        if self.backend.timeout_seconds == 0 {
            return Err(ConfigError::invalid("backend.timeout_seconds", "0"));
        }

        if self.catalog.source == CatalogSource::Backend && self.backend.anon_key.is_empty() {
            return Err(ConfigError::Missing(
                "backend.anon_key (required when catalog.source = \"backend\")".to_string(),
            ));
        }
        if self.backend.anon_key.is_empty() {
            warn!("backend.anon_key is empty; auth and per-user pages will fail");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.catalog.source, CatalogSource::Static);
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_partial_toml_keeps_section_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [server]
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_overrides_apply() {
        let mut config = AppConfig::default();
        config
            .apply_env_overrides(env(&[
                ("TOOLHUB_PORT", "3001"),
                ("TOOLHUB_BACKEND_URL", "https://demo.supabase.co"),
                ("TOOLHUB_ANON_KEY", "anon"),
                ("TOOLHUB_CATALOG_SOURCE", "backend"),
                ("TOOLHUB_LOG_FORMAT", "json"),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 3001);
        assert_eq!(config.backend.url, "https://demo.supabase.co");
        assert_eq!(config.catalog.source, CatalogSource::Backend);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_port_override_is_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env_overrides(env(&[("TOOLHUB_PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "TOOLHUB_PORT"));
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let mut config = AppConfig::default();
        config
            .apply_env_overrides(env(&[("TOOLHUB_HOST", "  ")]))
            .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_backend_catalog_requires_anon_key() {
        let mut config = AppConfig::default();
        config.catalog.source = CatalogSource::Backend;
        assert!(matches!(config.validate(), Err(ConfigError::Missing(_))));
    }

    #[test]
    fn test_non_http_backend_url_rejected() {
        let mut config = AppConfig::default();
        config.backend.url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backend_debug_redacts_key() {
        let mut config = AppConfig::default();
        config.backend.anon_key = "super-secret".to_string();
        let debug = format!("{:?}", config.backend);
        assert!(!debug.contains("super-secret"));
    }
}
