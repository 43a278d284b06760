//! Per-user pages: dashboard, favorites, notifications

use crate::error::ResultExt;
use crate::extract::BearerToken;
use crate::state::AppState;
use crate::{Result, WebError};
use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use toolhub_core::dashboard::DASHBOARD_LIMIT;
use toolhub_core::{
    relative_age, unread_count, CollaboratorResult, DashboardSummary, LoadBoundary, Notification,
};
use tracing::warn;

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard", get(dashboard))
        .route("/api/favorites", get(list_favorites))
        .route("/api/favorites/{id}", delete(remove_favorite))
        .route("/api/notifications", get(list_notifications))
        .route("/api/notifications/{id}/read", post(mark_read))
        .route("/api/notifications/read-all", post(mark_all_read))
}

/// A failed panel renders empty instead of failing the page
fn or_empty<T: Default>(panel: &str, result: CollaboratorResult<T>) -> T {
    result.unwrap_or_else(|e| {
        warn!("Dashboard {} unavailable: {}", panel, e);
        T::default()
    })
}

async fn dashboard(State(state): State<AppState>, token: BearerToken) -> Result<Json<DashboardSummary>> {
    let boundary = LoadBoundary::new();
    let user = boundary
        .run(state.sessions.require(token.as_ref()))
        .await??;

    let (profile, favorites, activity) = boundary
        .run(async {
            tokio::join!(
                state.profiles.get_profile(&user.token, user.id()),
                state
                    .favorites
                    .list_favorites(&user.token, user.id(), Some(DASHBOARD_LIMIT)),
                state
                    .activity
                    .recent_activity(&user.token, user.id(), DASHBOARD_LIMIT),
            )
        })
        .await?;

    Ok(Json(DashboardSummary::compose(
        &user.user,
        or_empty("profile", profile),
        or_empty("favorites", favorites),
        or_empty("activity", activity),
    )))
}

async fn list_favorites(State(state): State<AppState>, token: BearerToken) -> Result<Json<Value>> {
    let boundary = LoadBoundary::new();
    let user = boundary
        .run(state.sessions.require(token.as_ref()))
        .await??;

    let favorites = boundary
        .run(state.favorites.list_favorites(&user.token, user.id(), None))
        .await?
        .or_fail("Failed to load favorites")?;

    Ok(Json(json!({ "favorites": favorites })))
}

async fn remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
    token: BearerToken,
) -> Result<Json<Value>> {
    let boundary = LoadBoundary::new();
    let user = boundary
        .run(state.sessions.require(token.as_ref()))
        .await??;

    boundary
        .run(state.favorites.remove_favorite(&user.token, &id))
        .await?
        .or_fail("Failed to remove favorite")?;

    Ok(Json(json!({
        "message": "Tool has been removed from your favorites."
    })))
}

#[derive(Serialize)]
struct NotificationView<'a> {
    #[serde(flatten)]
    notification: &'a Notification,
    age: String,
}

async fn list_notifications(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<Json<Value>> {
    let boundary = LoadBoundary::new();
    let user = boundary
        .run(state.sessions.require(token.as_ref()))
        .await??;

    let notifications = boundary
        .run(state.notifications.list_notifications(&user.token, user.id()))
        .await?
        .or_fail("Failed to load notifications")?;

    let now = Utc::now();
    let views: Vec<NotificationView> = notifications
        .iter()
        .map(|n| NotificationView {
            notification: n,
            age: relative_age(n.created_at, now),
        })
        .collect();

    Ok(Json(json!({
        "unread": unread_count(&notifications),
        "notifications": views,
    })))
}

async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
    token: BearerToken,
) -> Result<Json<Value>> {
    let boundary = LoadBoundary::new();
    let user = boundary
        .run(state.sessions.require(token.as_ref()))
        .await??;

    let found = boundary
        .run(state.notifications.mark_read(&user.token, user.id(), &id))
        .await?
        .or_fail("Failed to update notification")?;
    if !found {
        return Err(WebError::NotFound("Notification not found".to_string()));
    }

    Ok(Json(json!({ "id": id, "is_read": true })))
}

async fn mark_all_read(State(state): State<AppState>, token: BearerToken) -> Result<Json<Value>> {
    let boundary = LoadBoundary::new();
    let user = boundary
        .run(state.sessions.require(token.as_ref()))
        .await??;

    boundary
        .run(state.notifications.mark_all_read(&user.token, user.id()))
        .await?
        .or_fail("Failed to update notifications")?;

    Ok(Json(json!({ "message": "All notifications marked as read." })))
}
