//! Role management and catalog curation, admin only

use crate::error::ResultExt;
use crate::extract::BearerToken;
use crate::state::AppState;
use crate::{Result, WebError};
use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use toolhub_core::{AuthenticatedUser, LoadBoundary, Role, RoleSummary, Tool, ToolDraft};
use tracing::info;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/roles", get(list_roles))
        .route("/api/admin/roles/{user_id}/toggle", post(toggle_role))
        .route("/api/admin/tools", post(create_tool))
        .route("/api/admin/tools/{id}", put(update_tool).delete(delete_tool))
}

/// Session Gate, then Role Gate
async fn require_admin(
    state: &AppState,
    boundary: &LoadBoundary,
    token: &BearerToken,
) -> Result<AuthenticatedUser> {
    let user = boundary
        .run(state.sessions.require(token.as_ref()))
        .await??;
    boundary.run(state.role_gate.require_admin(&user)).await??;
    Ok(user)
}

async fn list_roles(State(state): State<AppState>, token: BearerToken) -> Result<Json<Value>> {
    let boundary = LoadBoundary::new();
    let admin = require_admin(&state, &boundary, &token).await?;

    let roles = boundary
        .run(state.roles.list_roles(&admin.token))
        .await?
        .or_fail("Failed to load user roles")?;

    Ok(Json(json!({
        "summary": RoleSummary::from_records(&roles),
        "roles": roles,
    })))
}

async fn toggle_role(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    token: BearerToken,
) -> Result<Json<Value>> {
    let boundary = LoadBoundary::new();
    let admin = require_admin(&state, &boundary, &token).await?;

    let current = boundary
        .run(state.roles.role_for(&admin.token, &user_id))
        .await?
        .or_fail("Failed to update user role.")?
        .map(|r| r.role)
        .unwrap_or(Role::User);
    let role = current.toggled();

    boundary
        .run(state.roles.set_role(&admin.token, &user_id, role))
        .await?
        .or_fail("Failed to update user role.")?;
    info!("{} changed role of {} to {}", admin.id(), user_id, role);

    Ok(Json(json!({
        "user_id": user_id,
        "role": role,
        "message": format!("User role updated to {role}."),
    })))
}

async fn create_tool(
    State(state): State<AppState>,
    token: BearerToken,
    Json(draft): Json<ToolDraft>,
) -> Result<Json<Tool>> {
    let boundary = LoadBoundary::new();
    let admin = require_admin(&state, &boundary, &token).await?;
    draft.validate()?;

    let tool = boundary
        .run(state.catalog.insert_tool(&admin.token, draft))
        .await?
        .or_fail("Failed to create tool")?;
    info!("{} added tool {} ({})", admin.id(), tool.name, tool.id);
    Ok(Json(tool))
}

async fn update_tool(
    State(state): State<AppState>,
    Path(id): Path<String>,
    token: BearerToken,
    Json(draft): Json<ToolDraft>,
) -> Result<Json<Tool>> {
    let boundary = LoadBoundary::new();
    let admin = require_admin(&state, &boundary, &token).await?;
    draft.validate()?;

    match boundary
        .run(state.catalog.update_tool(&admin.token, &id, draft))
        .await?
    {
        Ok(tool) => Ok(Json(tool)),
        Err(e) if e.is_not_found() => Err(WebError::NotFound("Tool not found".to_string())),
        Err(e) => Err(e).or_fail("Failed to update tool"),
    }
}

async fn delete_tool(
    State(state): State<AppState>,
    Path(id): Path<String>,
    token: BearerToken,
) -> Result<Json<Value>> {
    let boundary = LoadBoundary::new();
    let admin = require_admin(&state, &boundary, &token).await?;

    match boundary
        .run(state.catalog.delete_tool(&admin.token, &id))
        .await?
    {
        Ok(()) => {
            info!("{} removed tool {}", admin.id(), id);
            Ok(Json(json!({ "id": id, "deleted": true })))
        }
        Err(e) if e.is_not_found() => Err(WebError::NotFound("Tool not found".to_string())),
        Err(e) => Err(e).or_fail("Failed to delete tool"),
    }
}
