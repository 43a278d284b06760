//! Session and Role gates
//!
//! Both gates are conveniences for shaping responses. Row policies on the
//! backend remain the actual access boundary, so nothing here is trusted for
//! data protection.

use crate::{AccessToken, AuthProvider, GateError, Role, RoleRepository, User};
use std::sync::Arc;
use tracing::{debug, warn};

/// A user whose token the auth collaborator accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: AccessToken,
}

impl AuthenticatedUser {
    pub fn id(&self) -> &str {
        &self.user.id
    }
}

/// Resolves the caller's session through an [`AuthProvider`]
#[derive(Clone)]
pub struct SessionGate {
    auth: Arc<dyn AuthProvider>,
}

impl SessionGate {
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self { auth }
    }

    /// Current session, if any. Collaborator failures read as "signed out".
    pub async fn current_session(&self, token: Option<&AccessToken>) -> Option<AuthenticatedUser> {
        let token = token?;
        match self.auth.current_user(token).await {
            Ok(Some(user)) => Some(AuthenticatedUser {
                user,
                token: token.clone(),
            }),
            Ok(None) => {
                debug!("Token rejected by auth provider");
                None
            }
            Err(e) => {
                warn!("Session lookup failed, treating as signed out: {}", e);
                None
            }
        }
    }

    /// Like [`Self::current_session`] but a missing session is an error the
    /// caller turns into a redirect to the login page.
    pub async fn require(&self, token: Option<&AccessToken>) -> Result<AuthenticatedUser, GateError> {
        self.current_session(token)
            .await
            .ok_or(GateError::Unauthenticated)
    }
}

/// Resolves a user's role from the `user_roles` records
#[derive(Clone)]
pub struct RoleGate {
    roles: Arc<dyn RoleRepository>,
}

impl RoleGate {
    pub fn new(roles: Arc<dyn RoleRepository>) -> Self {
        Self { roles }
    }

    /// Absent records and lookup failures both resolve to [`Role::User`]
    pub async fn role_of(&self, session: &AuthenticatedUser) -> Role {
        match self.roles.role_for(&session.token, session.id()).await {
            Ok(Some(record)) => record.role,
            Ok(None) => Role::User,
            Err(e) => {
                warn!("Role lookup failed for {}, assuming user: {}", session.id(), e);
                Role::User
            }
        }
    }

    pub async fn require_admin(&self, session: &AuthenticatedUser) -> Result<(), GateError> {
        match self.role_of(session).await {
            Role::Admin => Ok(()),
            Role::User => Err(GateError::Forbidden),
        }
    }
}
