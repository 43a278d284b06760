use super::{Account, MemoryBackend, State};
use crate::{
    AccessToken, AuthProvider, CollaboratorError, CollaboratorResult, Profile, Role, RoleRecord,
    Session, SignInRequest, SignUpRequest, User,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing::debug;
use uuid::Uuid;

/// Session lifetime handed out by sign-in
const SESSION_TTL_HOURS: i64 = 1;

/// Insert the account plus the profile and default role a sign-up
/// trigger would create
pub(super) fn create_account(
    state: &mut State,
    email: &str,
    password: &str,
    full_name: &str,
) -> User {
    let user = User {
        id: Uuid::new_v4().to_string(),
        email: Some(email.to_string()),
        full_name: Some(full_name.to_string()),
    };
    state.profiles.insert(
        user.id.clone(),
        Profile {
            id: user.id.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
        },
    );
    let profile = state.profile_summary(&user.id);
    state.roles.push(RoleRecord {
        id: Uuid::new_v4().to_string(),
        user_id: user.id.clone(),
        role: Role::User,
        profile,
    });
    state.accounts.push(Account {
        user: user.clone(),
        password: password.to_string(),
    });
    user
}

pub(super) fn open_session(state: &mut State, user: User) -> Session {
    let token = Uuid::new_v4().to_string();
    state.sessions.insert(token.clone(), user.id.clone());
    Session {
        access_token: AccessToken::new(token),
        refresh_token: Some(Uuid::new_v4().to_string()),
        expires_at: Some(Utc::now() + Duration::hours(SESSION_TTL_HOURS)),
        user,
    }
}

#[async_trait]
impl AuthProvider for MemoryBackend {
    async fn current_user(&self, token: &AccessToken) -> CollaboratorResult<Option<User>> {
        self.check()?;
        Ok(self.read().user_for(token).ok().cloned())
    }

    async fn sign_up(&self, request: SignUpRequest) -> CollaboratorResult<Option<Session>> {
        self.check()?;
        let mut state = self.write();
        let taken = state
            .accounts
            .iter()
            .any(|a| a.user.email.as_deref() == Some(request.email.as_str()));
        if taken {
            return Err(CollaboratorError::Conflict(
                "User already registered".to_string(),
            ));
        }

        let user = create_account(
            &mut state,
            &request.email,
            &request.password,
            &request.full_name,
        );
        debug!("Registered {} (redirect {:?})", user.id, request.redirect_to);
        Ok(Some(open_session(&mut state, user)))
    }

    async fn sign_in(&self, request: SignInRequest) -> CollaboratorResult<Session> {
        self.check()?;
        let mut state = self.write();
        let user = state
            .accounts
            .iter()
            .find(|a| {
                a.user.email.as_deref() == Some(request.email.as_str())
                    && a.password == request.password
            })
            .map(|a| a.user.clone())
            .ok_or_else(|| {
                CollaboratorError::Unauthorized("Invalid login credentials".to_string())
            })?;
        Ok(open_session(&mut state, user))
    }

    async fn request_password_reset(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> CollaboratorResult<()> {
        self.check()?;
        // Same answer whether or not the address is registered
        debug!("Password reset requested for {} (redirect {:?})", email, redirect_to);
        Ok(())
    }

    async fn update_password(
        &self,
        token: &AccessToken,
        password: &str,
    ) -> CollaboratorResult<()> {
        self.check()?;
        let mut state = self.write();
        let user_id = state.user_for(token)?.id.clone();
        if let Some(account) = state.accounts.iter_mut().find(|a| a.user.id == user_id) {
            account.password = password.to_string();
        }
        Ok(())
    }

    async fn sign_out(&self, token: &AccessToken) -> CollaboratorResult<()> {
        self.check()?;
        self.write().sessions.remove(token.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_up(email: &str) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            password: "secret1".to_string(),
            full_name: "Ada".to_string(),
            redirect_to: None,
        }
    }

    #[tokio::test]
    async fn test_sign_up_sign_in_sign_out() {
        let backend = MemoryBackend::new();
        let session = backend.sign_up(sign_up("ada@example.com")).await.unwrap().unwrap();
        assert!(backend.current_user(&session.access_token).await.unwrap().is_some());

        let again = backend
            .sign_in(SignInRequest {
                email: "ada@example.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(again.user.id, session.user.id);

        backend.sign_out(&session.access_token).await.unwrap();
        assert!(backend.current_user(&session.access_token).await.unwrap().is_none());
        assert!(backend.current_user(&again.access_token).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let backend = MemoryBackend::new();
        backend.sign_up(sign_up("ada@example.com")).await.unwrap();
        let err = backend.sign_up(sign_up("ada@example.com")).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let backend = MemoryBackend::new();
        backend.register("ada@example.com", "secret1", "Ada");
        let err = backend
            .sign_in(SignInRequest {
                email: "ada@example.com".to_string(),
                password: "wrong!".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CollaboratorError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_update_password_takes_effect() {
        let backend = MemoryBackend::new();
        let session = backend.register("ada@example.com", "secret1", "Ada");
        backend
            .update_password(&session.access_token, "better-secret")
            .await
            .unwrap();

        let signed_in = backend
            .sign_in(SignInRequest {
                email: "ada@example.com".to_string(),
                password: "better-secret".to_string(),
            })
            .await;
        assert!(signed_in.is_ok());
    }
}
