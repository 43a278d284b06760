//! Account settings and display preferences

use crate::error::ResultExt;
use crate::extract::BearerToken;
use crate::state::AppState;
use crate::Result;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use toolhub_core::settings::{PARTICLES_KEY, USER_SETTINGS_KEY, VIBE_MODE_KEY};
use toolhub_core::{DisplayPreferences, LoadBoundary, PreferencesUpdate, UserSettings};

/// Preference namespace for callers without a session
const ANONYMOUS: &str = "anonymous";

pub fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/api/settings", get(get_settings).put(save_settings))
        .route("/api/preferences", get(get_preferences).put(save_preferences))
}

async fn get_settings(State(state): State<AppState>, token: BearerToken) -> Result<Json<UserSettings>> {
    let boundary = LoadBoundary::new();
    let user = boundary
        .run(state.sessions.require(token.as_ref()))
        .await??;

    let raw = state
        .preferences
        .get(user.id(), USER_SETTINGS_KEY)
        .await
        .or_fail("Failed to load settings")?;
    Ok(Json(UserSettings::from_stored(raw.as_deref())))
}

async fn save_settings(
    State(state): State<AppState>,
    token: BearerToken,
    Json(settings): Json<UserSettings>,
) -> Result<Json<Value>> {
    let boundary = LoadBoundary::new();
    let user = boundary
        .run(state.sessions.require(token.as_ref()))
        .await??;

    state
        .preferences
        .set(user.id(), USER_SETTINGS_KEY, &settings.to_stored())
        .await
        .or_fail("Failed to save settings")?;

    Ok(Json(json!({
        "message": "Your preferences have been updated.",
        "settings": settings,
    })))
}

async fn namespace(state: &AppState, token: &BearerToken) -> String {
    state
        .sessions
        .current_session(token.as_ref())
        .await
        .map_or_else(|| ANONYMOUS.to_string(), |user| user.user.id)
}

async fn load_preferences(state: &AppState, ns: &str) -> Result<DisplayPreferences> {
    let vibe = state
        .preferences
        .get(ns, VIBE_MODE_KEY)
        .await
        .or_fail("Failed to load preferences")?;
    let particles = state
        .preferences
        .get(ns, PARTICLES_KEY)
        .await
        .or_fail("Failed to load preferences")?;
    Ok(DisplayPreferences::from_stored(
        vibe.as_deref(),
        particles.as_deref(),
    ))
}

async fn get_preferences(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<Json<DisplayPreferences>> {
    let boundary = LoadBoundary::new();
    let ns = boundary.run(namespace(&state, &token)).await?;
    let prefs = boundary.run(load_preferences(&state, &ns)).await??;
    Ok(Json(prefs))
}

async fn save_preferences(
    State(state): State<AppState>,
    token: BearerToken,
    Json(update): Json<PreferencesUpdate>,
) -> Result<Json<DisplayPreferences>> {
    let ns = namespace(&state, &token).await;
    let mut prefs = load_preferences(&state, &ns).await?;
    prefs.apply(update);

    state
        .preferences
        .set(&ns, VIBE_MODE_KEY, &prefs.stored_vibe_mode())
        .await
        .or_fail("Failed to save preferences")?;
    state
        .preferences
        .set(&ns, PARTICLES_KEY, &prefs.stored_particles())
        .await
        .or_fail("Failed to save preferences")?;

    Ok(Json(prefs))
}
