//! Catalog source selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the tool catalog is loaded from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// The built-in sample catalog, no network call
    #[default]
    Static,
    /// The `ai_tools` table of the backend
    Backend,
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Static => write!(f, "static"),
            CatalogSource::Backend => write!(f, "backend"),
        }
    }
}

impl FromStr for CatalogSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(CatalogSource::Static),
            "backend" => Ok(CatalogSource::Backend),
            other => Err(format!("unknown catalog source '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub source: CatalogSource,
}
