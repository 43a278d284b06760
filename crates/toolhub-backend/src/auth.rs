//! Auth service (`/auth/v1`) as an [`AuthProvider`]

use crate::client::SupabaseClient;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use toolhub_core::{
    AccessToken, AuthProvider, CollaboratorError, CollaboratorResult, Session, SignInRequest,
    SignUpRequest, User,
};
use tracing::{debug, info};

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<UserMetadata>,
}

impl From<AuthUser> for User {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.user_metadata.and_then(|m| m.full_name),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuthSession {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Unix seconds
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    expires_in: Option<i64>,
    user: AuthUser,
}

impl From<AuthSession> for Session {
    fn from(session: AuthSession) -> Self {
        let expires_at = session
            .expires_at
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .or_else(|| {
                session
                    .expires_in
                    .map(|secs| Utc::now() + Duration::seconds(secs))
            });
        Self {
            access_token: AccessToken::new(session.access_token),
            refresh_token: session.refresh_token,
            expires_at,
            user: session.user.into(),
        }
    }
}

fn with_redirect(url: String, redirect_to: Option<&str>) -> String {
    match redirect_to {
        Some(target) => format!("{}?redirect_to={}", url, urlencoding::encode(target)),
        None => url,
    }
}

#[async_trait]
impl AuthProvider for SupabaseClient {
    async fn current_user(&self, token: &AccessToken) -> CollaboratorResult<Option<User>> {
        let request = self.request(Method::GET, &self.auth_url("user"), Some(token));
        match self.execute(request).await {
            Ok(body) => {
                let user: AuthUser = serde_json::from_str(&body)?;
                Ok(Some(user.into()))
            }
            // Expired or forged tokens are "no session", not a failure
            Err(e) if matches!(e.status(), Some(401 | 403)) => {
                debug!("Auth service rejected token: {}", e);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn sign_up(&self, request: SignUpRequest) -> CollaboratorResult<Option<Session>> {
        let url = with_redirect(self.auth_url("signup"), request.redirect_to.as_deref());
        let body = json!({
            "email": request.email,
            "password": request.password,
            "data": { "full_name": request.full_name },
        });

        let response: Value = self
            .fetch(self.request(Method::POST, &url, None).json(&body))
            .await
            .map_err(|e| match e {
                CollaboratorError::Backend { status: 422, message } => {
                    CollaboratorError::Conflict(message)
                }
                other => other,
            })?;

        // Without auto-confirm the service answers with the bare user
        if response.get("access_token").is_some() {
            let session: AuthSession = serde_json::from_value(response)?;
            Ok(Some(session.into()))
        } else {
            info!("Sign-up for {} awaits email confirmation", request.email);
            Ok(None)
        }
    }

    async fn sign_in(&self, request: SignInRequest) -> CollaboratorResult<Session> {
        let url = self.auth_url("token?grant_type=password");
        let body = json!({ "email": request.email, "password": request.password });

        let session: AuthSession = self
            .fetch(self.request(Method::POST, &url, None).json(&body))
            .await
            .map_err(|e| match e {
                CollaboratorError::Backend { status: 400, message } => {
                    CollaboratorError::Unauthorized(message)
                }
                other => other,
            })?;
        Ok(session.into())
    }

    async fn request_password_reset(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> CollaboratorResult<()> {
        let url = with_redirect(self.auth_url("recover"), redirect_to);
        self.send(
            self.request(Method::POST, &url, None)
                .json(&json!({ "email": email })),
        )
        .await
    }

    async fn update_password(
        &self,
        token: &AccessToken,
        password: &str,
    ) -> CollaboratorResult<()> {
        self.send(
            self.request(Method::PUT, &self.auth_url("user"), Some(token))
                .json(&json!({ "password": password })),
        )
        .await
    }

    async fn sign_out(&self, token: &AccessToken) -> CollaboratorResult<()> {
        self.send(self.request(Method::POST, &self.auth_url("logout"), Some(token)))
            .await
    }
}
