//! Catalog browsing, tool detail, favorite toggle and activity logging

use crate::error::ResultExt;
use crate::extract::BearerToken;
use crate::state::AppState;
use crate::{Result, WebError};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use toolhub_core::{
    bind_cards, CatalogStore, CategorySelector, CollaboratorError, LoadBoundary, NewActivity,
    Tool, ToolCard, ToolFilter,
};
use tracing::{debug, warn};

pub fn tool_routes() -> Router<AppState> {
    Router::new()
        .route("/api/tools", get(list_tools))
        .route("/api/categories", get(list_categories))
        .route("/api/tools/{id}", get(get_tool))
        .route("/api/tools/{id}/favorite", post(toggle_favorite))
        .route("/api/tools/{id}/activity", post(record_activity))
}

#[derive(Debug, Default, Deserialize)]
struct ToolQuery {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

/// The store the listing endpoints filter: the built-in catalog, or a
/// fresh read of the backend table
async fn load_catalog(state: &AppState, boundary: &LoadBoundary) -> Result<Arc<CatalogStore>> {
    if let Some(store) = &state.static_catalog {
        return Ok(store.clone());
    }
    let tools = boundary
        .run(state.catalog.list_tools())
        .await?
        .or_fail("Failed to load tools")?;
    CatalogStore::new(tools)
        .map(Arc::new)
        .map_err(|e| CollaboratorError::decode(e.to_string()))
        .or_fail("Failed to load tools")
}

async fn find_tool(state: &AppState, id: &str) -> Result<Option<Tool>> {
    if let Some(tool) = state.static_catalog.as_ref().and_then(|s| s.get(id)) {
        return Ok(Some(tool.clone()));
    }
    state.catalog.get_tool(id).await.or_fail("Failed to load tool")
}

async fn list_tools(
    State(state): State<AppState>,
    Query(query): Query<ToolQuery>,
) -> Result<Json<Value>> {
    let boundary = LoadBoundary::new();
    let store = load_catalog(&state, &boundary).await?;

    let filter = ToolFilter::new(
        query.q.unwrap_or_default(),
        CategorySelector::parse(query.category.as_deref()),
    );
    let cards = bind_cards(store.filter(&filter));
    debug!("{} of {} tools match {:?}", cards.len(), store.len(), filter);

    Ok(Json(json!({
        "total": cards.len(),
        "tools": cards,
        "categories": store.categories(),
    })))
}

async fn list_categories(State(state): State<AppState>) -> Result<Json<Value>> {
    let boundary = LoadBoundary::new();
    let store = load_catalog(&state, &boundary).await?;
    Ok(Json(json!({ "categories": store.categories() })))
}

async fn get_tool(
    State(state): State<AppState>,
    Path(id): Path<String>,
    token: BearerToken,
) -> Result<Json<Value>> {
    let boundary = LoadBoundary::new();
    let (session, tool) = boundary
        .load_page(
            state.sessions.current_session(token.as_ref()),
            find_tool(&state, &id),
        )
        .await?;
    let tool = tool?.ok_or_else(|| WebError::NotFound("Tool not found".to_string()))?;

    let is_favorite = match &session {
        Some(user) => boundary
            .run(state.favorites.find_favorite(&user.token, user.id(), &tool.id))
            .await?
            .unwrap_or_else(|e| {
                warn!("Favorite lookup failed for {}: {}", tool.id, e);
                None
            })
            .is_some(),
        None => false,
    };

    Ok(Json(json!({
        "card": ToolCard::from(&tool),
        "tool": tool,
        "is_favorite": is_favorite,
    })))
}

async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
    token: BearerToken,
) -> Result<Json<Value>> {
    let boundary = LoadBoundary::new();
    let (session, tool) = boundary
        .load_page(
            state.sessions.require(token.as_ref()),
            find_tool(&state, &id),
        )
        .await?;
    let user = session?;
    let tool = tool?.ok_or_else(|| WebError::NotFound("Tool not found".to_string()))?;
    let id = tool.id;

    let existing = boundary
        .run(state.favorites.find_favorite(&user.token, user.id(), &id))
        .await?
        .or_fail("Failed to update favorites")?;

    let (is_favorite, message) = if existing.is_some() {
        boundary
            .run(
                state
                    .favorites
                    .remove_favorite_for_tool(&user.token, user.id(), &id),
            )
            .await?
            .or_fail("Failed to update favorites")?;
        (false, "Removed from favorites")
    } else {
        boundary
            .run(state.favorites.add_favorite(&user.token, user.id(), &id))
            .await?
            .or_fail("Failed to update favorites")?;
        (true, "Added to favorites!")
    };

    Ok(Json(json!({ "is_favorite": is_favorite, "message": message })))
}

#[derive(Debug, Deserialize)]
struct ActivityRequest {
    action: String,
}

/// Best effort: without a session, or when the write fails, nothing is
/// recorded and the caller is not told why.
async fn record_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    token: BearerToken,
    Json(req): Json<ActivityRequest>,
) -> Result<Json<Value>> {
    let action = req.action.trim();
    if action.is_empty() {
        return Err(WebError::BadRequest("Action is required".to_string()));
    }

    let boundary = LoadBoundary::new();
    let (session, tool) = boundary
        .load_page(
            state.sessions.current_session(token.as_ref()),
            find_tool(&state, &id),
        )
        .await?;
    let (Some(user), Ok(Some(tool))) = (session, tool) else {
        return Ok(Json(json!({ "recorded": false })));
    };

    let activity = NewActivity::for_tool(user.id(), action, &tool);
    let recorded = match boundary
        .run(state.activity.record_activity(&user.token, activity))
        .await?
    {
        Ok(()) => true,
        Err(e) => {
            warn!("Activity logging failed for {}: {}", tool.id, e);
            false
        }
    };
    Ok(Json(json!({ "recorded": recorded })))
}
