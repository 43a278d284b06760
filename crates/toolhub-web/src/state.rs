//! Shared handler state

use crate::{Result, WebError};
use std::sync::Arc;
use toolhub_config::{AppConfig, CatalogSource, StorageConfig};
use toolhub_core::{
    ActivityRepository, AuthProvider, CatalogRepository, CatalogStore, FavoritesRepository,
    JsonFilePreferenceStore, MemoryPreferenceStore, NotificationRepository, PreferenceStore,
    ProfileRepository, RoleGate, RoleRepository, SessionGate,
};
use tracing::info;

/// Every collaborator a backend must provide to serve the API
pub trait Backend:
    AuthProvider
    + CatalogRepository
    + FavoritesRepository
    + ActivityRepository
    + RoleRepository
    + ProfileRepository
    + NotificationRepository
    + 'static
{
}

impl<T> Backend for T where
    T: AuthProvider
        + CatalogRepository
        + FavoritesRepository
        + ActivityRepository
        + RoleRepository
        + ProfileRepository
        + NotificationRepository
        + 'static
{
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: Arc<dyn AuthProvider>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub favorites: Arc<dyn FavoritesRepository>,
    pub activity: Arc<dyn ActivityRepository>,
    pub roles: Arc<dyn RoleRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub preferences: Arc<dyn PreferenceStore>,
    pub sessions: SessionGate,
    pub role_gate: RoleGate,
    /// Built-in catalog served when `catalog.source` is `static`
    pub static_catalog: Option<Arc<CatalogStore>>,
}

impl AppState {
    pub fn new<B: Backend>(
        config: AppConfig,
        backend: Arc<B>,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Result<Self> {
        let static_catalog = match config.catalog.source {
            CatalogSource::Static => {
                let store = CatalogStore::new(toolhub_core::sample_catalog())
                    .map_err(|e| WebError::Config(e.to_string()))?;
                info!("Serving built-in catalog ({} tools)", store.len());
                Some(Arc::new(store))
            }
            CatalogSource::Backend => {
                info!("Serving catalog from backend table");
                None
            }
        };

        Ok(Self {
            config: Arc::new(config),
            auth: backend.clone(),
            catalog: backend.clone(),
            favorites: backend.clone(),
            activity: backend.clone(),
            roles: backend.clone(),
            profiles: backend.clone(),
            notifications: backend.clone(),
            sessions: SessionGate::new(backend.clone()),
            role_gate: RoleGate::new(backend),
            preferences,
            static_catalog,
        })
    }
}

/// File-backed preferences at the configured (or default) path, in-memory
/// when no data directory exists
pub fn open_preferences(config: &StorageConfig) -> Arc<dyn PreferenceStore> {
    match config
        .preferences_path
        .clone()
        .or_else(StorageConfig::default_preferences_path)
    {
        Some(path) => {
            info!("Persisting preferences to {}", path.display());
            Arc::new(JsonFilePreferenceStore::new(path))
        }
        None => {
            info!("No data directory; preferences are kept in memory");
            Arc::new(MemoryPreferenceStore::new())
        }
    }
}
