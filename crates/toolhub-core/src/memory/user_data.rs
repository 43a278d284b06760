use super::MemoryBackend;
use crate::notification::{mark_all_read, mark_read, welcome_notifications};
use crate::{
    AccessToken, Activity, ActivityRepository, CollaboratorError, CollaboratorResult, Favorite,
    FavoritesRepository, NewActivity, Notification, NotificationRepository, Profile,
    ProfileRepository, Role, RoleRecord, RoleRepository,
};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

#[async_trait]
impl FavoritesRepository for MemoryBackend {
    async fn list_favorites(
        &self,
        token: &AccessToken,
        user_id: &str,
        limit: Option<usize>,
    ) -> CollaboratorResult<Vec<Favorite>> {
        self.check()?;
        let state = self.read();
        state.require_owner(token, user_id)?;
        let favorites = state
            .favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .take(limit.unwrap_or(usize::MAX))
            .map(|f| Favorite {
                tool: state.tools.iter().find(|t| t.id == f.tool_id).cloned(),
                ..f.clone()
            })
            .collect();
        Ok(favorites)
    }

    async fn find_favorite(
        &self,
        token: &AccessToken,
        user_id: &str,
        tool_id: &str,
    ) -> CollaboratorResult<Option<Favorite>> {
        self.check()?;
        let state = self.read();
        state.require_owner(token, user_id)?;
        Ok(state
            .favorites
            .iter()
            .find(|f| f.user_id == user_id && f.tool_id == tool_id)
            .cloned())
    }

    async fn add_favorite(
        &self,
        token: &AccessToken,
        user_id: &str,
        tool_id: &str,
    ) -> CollaboratorResult<Favorite> {
        self.check()?;
        let mut state = self.write();
        state.require_owner(token, user_id)?;
        let favorite = Favorite {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            tool_id: tool_id.to_string(),
            tool: None,
        };
        state.favorites.push(favorite.clone());
        Ok(favorite)
    }

    async fn remove_favorite(
        &self,
        token: &AccessToken,
        favorite_id: &str,
    ) -> CollaboratorResult<()> {
        self.check()?;
        let mut state = self.write();
        let user_id = state.user_for(token)?.id.clone();
        state
            .favorites
            .retain(|f| !(f.id == favorite_id && f.user_id == user_id));
        Ok(())
    }

    async fn remove_favorite_for_tool(
        &self,
        token: &AccessToken,
        user_id: &str,
        tool_id: &str,
    ) -> CollaboratorResult<()> {
        self.check()?;
        let mut state = self.write();
        state.require_owner(token, user_id)?;
        state
            .favorites
            .retain(|f| !(f.user_id == user_id && f.tool_id == tool_id));
        Ok(())
    }
}

#[async_trait]
impl ActivityRepository for MemoryBackend {
    async fn recent_activity(
        &self,
        token: &AccessToken,
        user_id: &str,
        limit: usize,
    ) -> CollaboratorResult<Vec<Activity>> {
        self.check()?;
        let state = self.read();
        state.require_owner(token, user_id)?;
        // Newest first; later inserts win timestamp ties
        let mut rows: Vec<Activity> = state
            .activity
            .iter()
            .rev()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn record_activity(
        &self,
        token: &AccessToken,
        activity: NewActivity,
    ) -> CollaboratorResult<()> {
        self.check()?;
        let mut state = self.write();
        state.require_owner(token, &activity.user_id)?;
        state.activity.push(Activity {
            id: Uuid::new_v4().to_string(),
            user_id: activity.user_id,
            activity_type: activity.activity_type,
            activity_data: activity.activity_data,
            created_at: Utc::now(),
        });
        Ok(())
    }
}

#[async_trait]
impl RoleRepository for MemoryBackend {
    async fn role_for(
        &self,
        token: &AccessToken,
        user_id: &str,
    ) -> CollaboratorResult<Option<RoleRecord>> {
        self.check()?;
        let state = self.read();
        // Users read their own role; admins read anyone's
        if state.require_owner(token, user_id).is_err() {
            state.require_admin(token)?;
        }
        Ok(state.roles.iter().find(|r| r.user_id == user_id).cloned())
    }

    async fn list_roles(&self, token: &AccessToken) -> CollaboratorResult<Vec<RoleRecord>> {
        self.check()?;
        let state = self.read();
        state.require_admin(token)?;
        Ok(state
            .roles
            .iter()
            .map(|r| RoleRecord {
                profile: state.profile_summary(&r.user_id),
                ..r.clone()
            })
            .collect())
    }

    async fn set_role(
        &self,
        token: &AccessToken,
        user_id: &str,
        role: Role,
    ) -> CollaboratorResult<()> {
        self.check()?;
        let mut state = self.write();
        state.require_admin(token)?;
        let record = state
            .roles
            .iter_mut()
            .find(|r| r.user_id == user_id)
            .ok_or_else(|| CollaboratorError::NotFound(format!("role for {user_id}")))?;
        record.role = role;
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for MemoryBackend {
    async fn get_profile(
        &self,
        token: &AccessToken,
        user_id: &str,
    ) -> CollaboratorResult<Option<Profile>> {
        self.check()?;
        let state = self.read();
        state.require_owner(token, user_id)?;
        Ok(state.profiles.get(user_id).cloned())
    }
}

#[async_trait]
impl NotificationRepository for MemoryBackend {
    async fn list_notifications(
        &self,
        token: &AccessToken,
        user_id: &str,
    ) -> CollaboratorResult<Vec<Notification>> {
        self.check()?;
        let mut state = self.write();
        state.require_owner(token, user_id)?;
        Ok(state
            .notifications
            .entry(user_id.to_string())
            .or_insert_with(|| welcome_notifications(Utc::now()))
            .clone())
    }

    async fn mark_read(
        &self,
        token: &AccessToken,
        user_id: &str,
        notification_id: &str,
    ) -> CollaboratorResult<bool> {
        self.check()?;
        let mut state = self.write();
        state.require_owner(token, user_id)?;
        let list = state
            .notifications
            .entry(user_id.to_string())
            .or_insert_with(|| welcome_notifications(Utc::now()));
        Ok(mark_read(list, notification_id))
    }

    async fn mark_all_read(&self, token: &AccessToken, user_id: &str) -> CollaboratorResult<()> {
        self.check()?;
        let mut state = self.write();
        state.require_owner(token, user_id)?;
        let list = state
            .notifications
            .entry(user_id.to_string())
            .or_insert_with(|| welcome_notifications(Utc::now()));
        mark_all_read(list);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::VIEW;
    use crate::notification::unread_count;
    use crate::Session;

    fn signed_in(backend: &MemoryBackend) -> Session {
        backend.register("ada@example.com", "secret1", "Ada")
    }

    #[tokio::test]
    async fn test_favorites_embed_their_tool() {
        let backend = MemoryBackend::seeded();
        let session = signed_in(&backend);
        let (token, uid) = (&session.access_token, session.user.id.as_str());

        backend.add_favorite(token, uid, "2").await.unwrap();
        backend.add_favorite(token, uid, "5").await.unwrap();

        let all = backend.list_favorites(token, uid, None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].tool.as_ref().map(|t| t.name.as_str()), Some("Midjourney"));

        let capped = backend.list_favorites(token, uid, Some(1)).await.unwrap();
        assert_eq!(capped.len(), 1);

        backend.remove_favorite(token, &all[0].id).await.unwrap();
        backend.remove_favorite_for_tool(token, uid, "5").await.unwrap();
        assert!(backend.list_favorites(token, uid, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rows_of_other_users_are_refused() {
        let backend = MemoryBackend::seeded();
        let ada = signed_in(&backend);
        let bob = backend.register("bob@example.com", "secret1", "Bob");

        let err = backend
            .list_favorites(&bob.access_token, &ada.user.id, None)
            .await
            .unwrap_err();
        assert!(matches!(err, CollaboratorError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_recent_activity_newest_first() {
        let backend = MemoryBackend::seeded();
        let session = signed_in(&backend);
        let (token, uid) = (&session.access_token, session.user.id.as_str());
        let tools = crate::sample_catalog();

        for tool in &tools[..7] {
            backend
                .record_activity(token, NewActivity::for_tool(uid, VIEW, tool))
                .await
                .unwrap();
        }

        let recent = backend.recent_activity(token, uid, 5).await.unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].tool_name(), Some(tools[6].name.as_str()));
    }

    #[tokio::test]
    async fn test_role_listing_and_toggle_need_admin() {
        let backend = MemoryBackend::new();
        let admin = backend.register("root@example.com", "secret1", "Root");
        let member = signed_in(&backend);

        assert!(backend.list_roles(&member.access_token).await.is_err());

        backend.grant(&admin.user.id, Role::Admin);
        let roles = backend.list_roles(&admin.access_token).await.unwrap();
        assert_eq!(roles.len(), 2);
        assert!(roles.iter().any(|r| r.display_name() == "Ada"));

        backend
            .set_role(&admin.access_token, &member.user.id, Role::Admin)
            .await
            .unwrap();
        let record = backend
            .role_for(&member.access_token, &member.user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_notifications_start_with_welcome_set() {
        let backend = MemoryBackend::new();
        let session = signed_in(&backend);
        let (token, uid) = (&session.access_token, session.user.id.as_str());

        let list = backend.list_notifications(token, uid).await.unwrap();
        assert_eq!(unread_count(&list), 2);

        assert!(backend.mark_read(token, uid, "1").await.unwrap());
        assert!(!backend.mark_read(token, uid, "missing").await.unwrap());
        let list = backend.list_notifications(token, uid).await.unwrap();
        assert_eq!(unread_count(&list), 1);

        backend.mark_all_read(token, uid).await.unwrap();
        let list = backend.list_notifications(token, uid).await.unwrap();
        assert_eq!(unread_count(&list), 0);
    }

    #[tokio::test]
    async fn test_profile_created_at_sign_up() {
        let backend = MemoryBackend::new();
        let session = signed_in(&backend);
        let profile = backend
            .get_profile(&session.access_token, &session.user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.full_name.as_deref(), Some("Ada"));
    }
}
