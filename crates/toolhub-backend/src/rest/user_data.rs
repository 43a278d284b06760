use super::{RETURN_MINIMAL, RETURN_REPRESENTATION};
use crate::client::{eq, SupabaseClient};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use serde_json::json;
use toolhub_core::notification::welcome_notifications;
use toolhub_core::{
    AccessToken, Activity, ActivityRepository, CollaboratorError, CollaboratorResult, Favorite,
    FavoritesRepository, NewActivity, Notification, NotificationRepository, Profile,
    ProfileRepository, Role, RoleRecord, RoleRepository,
};
use tracing::{debug, warn};

const FAVORITES: &str = "user_favorites";
const FAVORITE_COLUMNS: &str = "id,user_id,tool_id,ai_tools(*)";
const ACTIVITY: &str = "user_activity";
const ROLES: &str = "user_roles";
const ROLE_COLUMNS: &str = "id,user_id,role,profiles:user_id(email,full_name)";
const PROFILES: &str = "profiles";
const NOTIFICATIONS: &str = "notifications";

#[async_trait]
impl FavoritesRepository for SupabaseClient {
    async fn list_favorites(
        &self,
        token: &AccessToken,
        user_id: &str,
        limit: Option<usize>,
    ) -> CollaboratorResult<Vec<Favorite>> {
        let mut query = format!("select={}&{}", FAVORITE_COLUMNS, eq("user_id", user_id));
        if let Some(limit) = limit {
            query.push_str(&format!("&limit={limit}"));
        }
        let url = self.rest_url(FAVORITES, &query);
        self.fetch(self.request(Method::GET, &url, Some(token))).await
    }

    async fn find_favorite(
        &self,
        token: &AccessToken,
        user_id: &str,
        tool_id: &str,
    ) -> CollaboratorResult<Option<Favorite>> {
        let query = format!(
            "select=id,user_id,tool_id&{}&{}&limit=1",
            eq("user_id", user_id),
            eq("tool_id", tool_id)
        );
        let url = self.rest_url(FAVORITES, &query);
        let rows: Vec<Favorite> = self.fetch(self.request(Method::GET, &url, Some(token))).await?;
        Ok(rows.into_iter().next())
    }

    async fn add_favorite(
        &self,
        token: &AccessToken,
        user_id: &str,
        tool_id: &str,
    ) -> CollaboratorResult<Favorite> {
        let url = self.rest_url(FAVORITES, "");
        let rows: Vec<Favorite> = self
            .fetch(
                self.request(Method::POST, &url, Some(token))
                    .header("Prefer", RETURN_REPRESENTATION)
                    .json(&json!({ "user_id": user_id, "tool_id": tool_id })),
            )
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| CollaboratorError::decode("insert returned no row"))
    }

    async fn remove_favorite(
        &self,
        token: &AccessToken,
        favorite_id: &str,
    ) -> CollaboratorResult<()> {
        let url = self.rest_url(FAVORITES, &eq("id", favorite_id));
        self.send(self.request(Method::DELETE, &url, Some(token)))
            .await
    }

    async fn remove_favorite_for_tool(
        &self,
        token: &AccessToken,
        user_id: &str,
        tool_id: &str,
    ) -> CollaboratorResult<()> {
        let query = format!("{}&{}", eq("user_id", user_id), eq("tool_id", tool_id));
        let url = self.rest_url(FAVORITES, &query);
        self.send(self.request(Method::DELETE, &url, Some(token)))
            .await
    }
}

#[async_trait]
impl ActivityRepository for SupabaseClient {
    async fn recent_activity(
        &self,
        token: &AccessToken,
        user_id: &str,
        limit: usize,
    ) -> CollaboratorResult<Vec<Activity>> {
        let query = format!(
            "select=*&{}&order=created_at.desc&limit={}",
            eq("user_id", user_id),
            limit
        );
        let url = self.rest_url(ACTIVITY, &query);
        self.fetch(self.request(Method::GET, &url, Some(token))).await
    }

    async fn record_activity(
        &self,
        token: &AccessToken,
        activity: NewActivity,
    ) -> CollaboratorResult<()> {
        let url = self.rest_url(ACTIVITY, "");
        self.send(
            self.request(Method::POST, &url, Some(token))
                .header("Prefer", RETURN_MINIMAL)
                .json(&activity),
        )
        .await
    }
}

#[async_trait]
impl RoleRepository for SupabaseClient {
    async fn role_for(
        &self,
        token: &AccessToken,
        user_id: &str,
    ) -> CollaboratorResult<Option<RoleRecord>> {
        let query = format!("select=id,user_id,role&{}&limit=1", eq("user_id", user_id));
        let url = self.rest_url(ROLES, &query);
        let rows: Vec<RoleRecord> = self.fetch(self.request(Method::GET, &url, Some(token))).await?;
        Ok(rows.into_iter().next())
    }

    async fn list_roles(&self, token: &AccessToken) -> CollaboratorResult<Vec<RoleRecord>> {
        let url = self.rest_url(ROLES, &format!("select={ROLE_COLUMNS}"));
        self.fetch(self.request(Method::GET, &url, Some(token))).await
    }

    async fn set_role(
        &self,
        token: &AccessToken,
        user_id: &str,
        role: Role,
    ) -> CollaboratorResult<()> {
        let url = self.rest_url(ROLES, &eq("user_id", user_id));
        let rows: Vec<RoleRecord> = self
            .fetch(
                self.request(Method::PATCH, &url, Some(token))
                    .header("Prefer", RETURN_REPRESENTATION)
                    .json(&json!({ "role": role })),
            )
            .await?;
        if rows.is_empty() {
            return Err(CollaboratorError::NotFound(format!("role for {user_id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for SupabaseClient {
    async fn get_profile(
        &self,
        token: &AccessToken,
        user_id: &str,
    ) -> CollaboratorResult<Option<Profile>> {
        let query = format!("select=*&{}&limit=1", eq("id", user_id));
        let url = self.rest_url(PROFILES, &query);
        let rows: Vec<Profile> = self.fetch(self.request(Method::GET, &url, Some(token))).await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl NotificationRepository for SupabaseClient {
    async fn list_notifications(
        &self,
        token: &AccessToken,
        user_id: &str,
    ) -> CollaboratorResult<Vec<Notification>> {
        let query = format!(
            "select=*&{}&order=created_at.desc",
            eq("user_id", user_id)
        );
        let url = self.rest_url(NOTIFICATIONS, &query);
        match self
            .execute(self.request(Method::GET, &url, Some(token)))
            .await
        {
            Ok(body) => Ok(serde_json::from_str(&body)?),
            Err(e) if e.is_missing_relation() => {
                warn!("No notifications table on backend, serving welcome set");
                Ok(self.welcome_set(user_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn mark_read(
        &self,
        token: &AccessToken,
        user_id: &str,
        notification_id: &str,
    ) -> CollaboratorResult<bool> {
        let query = format!("{}&{}", eq("id", notification_id), eq("user_id", user_id));
        let url = self.rest_url(NOTIFICATIONS, &query);
        let request = self
            .request(Method::PATCH, &url, Some(token))
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&json!({ "is_read": true }));
        match self.execute(request).await {
            Ok(body) => {
                let rows: Vec<Notification> = serde_json::from_str(&body)?;
                Ok(!rows.is_empty())
            }
            Err(e) if e.is_missing_relation() => {
                let found = self
                    .welcome_set(user_id)
                    .iter()
                    .any(|n| n.id == notification_id);
                if found {
                    debug!("No notifications table; marking welcome {} locally", notification_id);
                    self.mark_welcome_read(user_id, [notification_id.to_string()]);
                }
                Ok(found)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn mark_all_read(&self, token: &AccessToken, user_id: &str) -> CollaboratorResult<()> {
        let query = format!("{}&is_read=eq.false", eq("user_id", user_id));
        let url = self.rest_url(NOTIFICATIONS, &query);
        let request = self
            .request(Method::PATCH, &url, Some(token))
            .header("Prefer", RETURN_MINIMAL)
            .json(&json!({ "is_read": true }));
        match self.execute(request).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_missing_relation() => {
                let ids = self.welcome_set(user_id).into_iter().map(|n| n.id);
                self.mark_welcome_read(user_id, ids);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl SupabaseClient {
    /// Welcome entries with this user's locally kept read flags applied
    fn welcome_set(&self, user_id: &str) -> Vec<Notification> {
        let read = self.welcome_read_ids(user_id);
        let mut notifications = welcome_notifications(Utc::now());
        for n in notifications.iter_mut() {
            n.is_read = read.contains(&n.id);
        }
        notifications
    }
}
