//! Preference storage persisted to a JSON file
//!
//! The file holds `{ namespace: { key: value } }`. It is read on every
//! lookup and rewritten through a temp file on every change, so a crash
//! never leaves a half-written document behind.

use crate::{CollaboratorResult, PreferenceStore};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

type Document = BTreeMap<String, BTreeMap<String, String>>;

pub struct JsonFilePreferenceStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl JsonFilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> CollaboratorResult<Document> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(
                    "Ignoring unreadable preferences file {}: {}",
                    self.path.display(),
                    e
                );
                Document::new()
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Document::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, doc: &Document) -> CollaboratorResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(doc)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for JsonFilePreferenceStore {
    async fn get(&self, namespace: &str, key: &str) -> CollaboratorResult<Option<String>> {
        let doc = self.load().await?;
        Ok(doc.get(namespace).and_then(|ns| ns.get(key)).cloned())
    }

    async fn set(&self, namespace: &str, key: &str, value: &str) -> CollaboratorResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.load().await?;
        doc.entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self.save(&doc).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_values_survive_a_new_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let store = JsonFilePreferenceStore::new(&path);
        assert_eq!(store.get("anonymous", "vibeMode").await.unwrap(), None);
        store.set("anonymous", "vibeMode", "true").await.unwrap();
        store.set("u1", "particlesEnabled", "false").await.unwrap();

        let reopened = JsonFilePreferenceStore::new(&path);
        assert_eq!(
            reopened.get("anonymous", "vibeMode").await.unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(
            reopened.get("u1", "particlesEnabled").await.unwrap().as_deref(),
            Some("false")
        );
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{oops").unwrap();

        let store = JsonFilePreferenceStore::new(&path);
        assert_eq!(store.get("u1", "vibeMode").await.unwrap(), None);
        store.set("u1", "vibeMode", "false").await.unwrap();
        assert_eq!(store.get("u1", "vibeMode").await.unwrap().as_deref(), Some("false"));
    }
}
