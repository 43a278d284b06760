//! In-process collaborators
//!
//! [`MemoryBackend`] implements every collaborator trait over shared state,
//! including the row policies the hosted backend enforces: user-scoped rows
//! need a live session and catalog writes need the admin role. It backs the
//! `--offline` server mode and the test suites.

mod auth;
mod catalog;
mod preferences;
mod user_data;

pub use preferences::MemoryPreferenceStore;

use crate::{
    AccessToken, Activity, CollaboratorError, CollaboratorResult, Favorite, Notification, Profile,
    ProfileSummary, Role, RoleRecord, Session, Tool, User,
};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

struct Account {
    user: User,
    password: String,
}

#[derive(Default)]
struct State {
    tools: Vec<Tool>,
    accounts: Vec<Account>,
    /// access token -> user id
    sessions: HashMap<String, String>,
    profiles: HashMap<String, Profile>,
    roles: Vec<RoleRecord>,
    favorites: Vec<Favorite>,
    activity: Vec<Activity>,
    notifications: HashMap<String, Vec<Notification>>,
}

impl State {
    fn user_for(&self, token: &AccessToken) -> CollaboratorResult<&User> {
        let user_id = self
            .sessions
            .get(token.as_str())
            .ok_or_else(|| CollaboratorError::Unauthorized("invalid token".to_string()))?;
        self.accounts
            .iter()
            .map(|a| &a.user)
            .find(|u| &u.id == user_id)
            .ok_or_else(|| CollaboratorError::Unauthorized("user no longer exists".to_string()))
    }

    /// Row-policy check: the token must belong to `user_id`
    fn require_owner(&self, token: &AccessToken, user_id: &str) -> CollaboratorResult<()> {
        if self.user_for(token)?.id == user_id {
            Ok(())
        } else {
            Err(CollaboratorError::Unauthorized(
                "row belongs to another user".to_string(),
            ))
        }
    }

    fn require_admin(&self, token: &AccessToken) -> CollaboratorResult<&User> {
        let user = self.user_for(token)?;
        let is_admin = self
            .roles
            .iter()
            .any(|r| r.user_id == user.id && r.role == Role::Admin);
        if is_admin {
            Ok(user)
        } else {
            Err(CollaboratorError::Unauthorized("admin role required".to_string()))
        }
    }

    fn profile_summary(&self, user_id: &str) -> Option<ProfileSummary> {
        self.profiles.get(user_id).map(|p| ProfileSummary {
            email: p.email.clone(),
            full_name: p.full_name.clone(),
        })
    }
}

/// Shared in-process state behind every collaborator trait
#[derive(Default)]
pub struct MemoryBackend {
    state: RwLock<State>,
    failure: RwLock<Option<CollaboratorError>>,
}

impl MemoryBackend {
    /// Empty backend with no tools and no accounts
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tools(tools: Vec<Tool>) -> Self {
        let backend = Self::new();
        backend.write().tools = tools;
        backend
    }

    /// Backend preloaded with [`crate::sample_catalog`]
    pub fn seeded() -> Self {
        Self::with_tools(crate::sample_catalog())
    }

    /// Make every subsequent call fail with `error`, or clear with `None`
    pub fn fail_with(&self, error: Option<CollaboratorError>) {
        *self
            .failure
            .write()
            .unwrap_or_else(PoisonError::into_inner) = error;
    }

    /// Create a confirmed account and return a live session for it
    pub fn register(&self, email: &str, password: &str, full_name: &str) -> Session {
        let mut state = self.write();
        let user = auth::create_account(&mut state, email, password, full_name);
        auth::open_session(&mut state, user)
    }

    /// Set the role record for `user_id`, creating it if needed
    pub fn grant(&self, user_id: &str, role: Role) {
        let mut state = self.write();
        let profile = state.profile_summary(user_id);
        match state.roles.iter().position(|r| r.user_id == user_id) {
            Some(i) => state.roles[i].role = role,
            None => state.roles.push(RoleRecord {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                role,
                profile,
            }),
        }
    }

    fn check(&self) -> CollaboratorResult<()> {
        match &*self.failure.read().unwrap_or_else(PoisonError::into_inner) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
