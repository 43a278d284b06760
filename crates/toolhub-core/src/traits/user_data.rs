use crate::{
    AccessToken, Activity, CollaboratorResult, Favorite, NewActivity, Notification, Profile, Role,
    RoleRecord,
};
use async_trait::async_trait;

/// `(user, tool)` favorites. Uniqueness of the pair is left to the collaborator.
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// Favorites with their embedded tool, optionally capped at `limit`
    async fn list_favorites(
        &self,
        token: &AccessToken,
        user_id: &str,
        limit: Option<usize>,
    ) -> CollaboratorResult<Vec<Favorite>>;

    async fn find_favorite(
        &self,
        token: &AccessToken,
        user_id: &str,
        tool_id: &str,
    ) -> CollaboratorResult<Option<Favorite>>;

    async fn add_favorite(
        &self,
        token: &AccessToken,
        user_id: &str,
        tool_id: &str,
    ) -> CollaboratorResult<Favorite>;

    async fn remove_favorite(&self, token: &AccessToken, favorite_id: &str)
        -> CollaboratorResult<()>;

    async fn remove_favorite_for_tool(
        &self,
        token: &AccessToken,
        user_id: &str,
        tool_id: &str,
    ) -> CollaboratorResult<()>;
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Newest first
    async fn recent_activity(
        &self,
        token: &AccessToken,
        user_id: &str,
        limit: usize,
    ) -> CollaboratorResult<Vec<Activity>>;

    async fn record_activity(
        &self,
        token: &AccessToken,
        activity: NewActivity,
    ) -> CollaboratorResult<()>;
}

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn role_for(
        &self,
        token: &AccessToken,
        user_id: &str,
    ) -> CollaboratorResult<Option<RoleRecord>>;

    /// Every role row with the owning profile embedded
    async fn list_roles(&self, token: &AccessToken) -> CollaboratorResult<Vec<RoleRecord>>;

    async fn set_role(&self, token: &AccessToken, user_id: &str, role: Role)
        -> CollaboratorResult<()>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn get_profile(
        &self,
        token: &AccessToken,
        user_id: &str,
    ) -> CollaboratorResult<Option<Profile>>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn list_notifications(
        &self,
        token: &AccessToken,
        user_id: &str,
    ) -> CollaboratorResult<Vec<Notification>>;

    /// Returns whether a matching notification existed
    async fn mark_read(
        &self,
        token: &AccessToken,
        user_id: &str,
        notification_id: &str,
    ) -> CollaboratorResult<bool>;

    async fn mark_all_read(&self, token: &AccessToken, user_id: &str) -> CollaboratorResult<()>;
}
