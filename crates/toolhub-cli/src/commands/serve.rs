use anyhow::{Context, Result};
use std::sync::Arc;
use toolhub_backend::SupabaseClient;
use toolhub_config::{AppConfig, CatalogSource};
use toolhub_core::{MemoryBackend, Role, SignUpForm};
use toolhub_web::{open_preferences, start_server, AppState};
use tracing::{info, warn};

pub async fn execute(
    mut config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<String>,
    offline: bool,
    admin: Option<(String, String)>,
) -> Result<()> {
    apply_overrides(&mut config, host, port, static_dir);
    let preferences = open_preferences(&config.storage);

    let state = if offline {
        // Admin edits land in the in-process table, so list from it
        config.catalog.source = CatalogSource::Backend;
        warn!("Offline mode: accounts and data live in memory and are lost on exit");
        let backend = offline_backend(admin)?;
        AppState::new(config, Arc::new(backend), preferences)?
    } else {
        let client = SupabaseClient::new(&config.backend)?;
        info!("Using backend at {}", client.base_url());
        AppState::new(config, Arc::new(client), preferences)?
    };

    start_server(state).await.context("Web server failed")
}

/// Seeded in-process backend, optionally with one admin account
fn offline_backend(admin: Option<(String, String)>) -> Result<MemoryBackend> {
    let backend = MemoryBackend::seeded();
    if let Some((email, password)) = admin {
        SignUpForm {
            email: email.clone(),
            password: password.clone(),
            full_name: "Administrator".to_string(),
        }
        .validate()
        .with_context(|| format!("Invalid admin account {email}"))?;

        let session = backend.register(&email, &password, "Administrator");
        backend.grant(&session.user.id, Role::Admin);
        info!("Offline admin account: {}", email);
    }
    Ok(backend)
}

fn apply_overrides(
    config: &mut AppConfig,
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<String>,
) {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if static_dir.is_some() {
        config.server.static_dir = static_dir;
    }
}
