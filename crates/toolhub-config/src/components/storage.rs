//! Local preference storage

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where display preferences and settings blobs are persisted.
///
/// `None` keeps them in memory for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub preferences_path: Option<PathBuf>,
}

impl StorageConfig {
    /// Default on-disk location under the user's data directory
    pub fn default_preferences_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("toolhub").join("preferences.json"))
    }
}
