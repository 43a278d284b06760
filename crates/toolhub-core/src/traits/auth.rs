use crate::{AccessToken, CollaboratorResult, Session, User};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Credential sign-up payload forwarded to the auth collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    /// Where the confirmation email should send the user
    pub redirect_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Identity collaborator: sessions, sign-up/in, password reset, sign-out.
///
/// Token validation happens entirely on the collaborator's side.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve the user owning `token`, `None` when the token is not valid
    async fn current_user(&self, token: &AccessToken) -> CollaboratorResult<Option<User>>;

    /// Register a new account. Returns the session when the collaborator
    /// signs the user in immediately, `None` when email confirmation is pending.
    async fn sign_up(&self, request: SignUpRequest) -> CollaboratorResult<Option<Session>>;

    async fn sign_in(&self, request: SignInRequest) -> CollaboratorResult<Session>;

    async fn request_password_reset(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> CollaboratorResult<()>;

    async fn update_password(&self, token: &AccessToken, password: &str)
        -> CollaboratorResult<()>;

    async fn sign_out(&self, token: &AccessToken) -> CollaboratorResult<()>;
}
