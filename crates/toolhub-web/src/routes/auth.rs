//! Sign-up, sign-in, password reset and sign-out

use crate::error::ResultExt;
use crate::extract::BearerToken;
use crate::state::AppState;
use crate::{Result, WebError};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use toolhub_core::{
    LoadBoundary, PasswordResetForm, PasswordUpdateForm, SignInForm, SignInRequest, SignUpForm,
    SignUpRequest,
};
use tracing::info;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signup", post(sign_up))
        .route("/api/auth/signin", post(sign_in))
        .route("/api/auth/forgot-password", post(forgot_password))
        .route("/api/auth/reset-password", post(reset_password))
        .route("/api/auth/signout", post(sign_out))
        .route("/api/auth/session", get(current_session))
}

async fn sign_up(State(state): State<AppState>, Json(form): Json<SignUpForm>) -> Result<Json<Value>> {
    form.validate()?;

    let request = SignUpRequest {
        email: form.email.trim().to_string(),
        password: form.password,
        full_name: form.full_name.trim().to_string(),
        redirect_to: Some(state.config.backend.signup_redirect()),
    };
    let session = state.auth.sign_up(request).await.or_fail("Failed to sign up")?;
    info!("New account registered");

    Ok(Json(json!({
        "message": "Please check your email to verify your account.",
        "session": session,
    })))
}

async fn sign_in(State(state): State<AppState>, Json(form): Json<SignInForm>) -> Result<Json<Value>> {
    form.validate()?;

    let session = state
        .auth
        .sign_in(SignInRequest {
            email: form.email.trim().to_string(),
            password: form.password,
        })
        .await
        .or_fail("Failed to sign in")?;

    Ok(Json(json!({
        "message": "Successfully signed in.",
        "session": session,
    })))
}

async fn forgot_password(
    State(state): State<AppState>,
    Json(form): Json<PasswordResetForm>,
) -> Result<Json<Value>> {
    form.validate()?;

    let redirect = state.config.backend.password_reset_redirect();
    state
        .auth
        .request_password_reset(form.email.trim(), Some(&redirect))
        .await
        .or_fail("Failed to send reset email")?;

    Ok(Json(json!({
        "message": "Check your inbox for password reset instructions."
    })))
}

/// Completes a reset: the recovery link signs the user in, and that
/// session's token authorizes the new password.
async fn reset_password(
    State(state): State<AppState>,
    token: BearerToken,
    Json(form): Json<PasswordUpdateForm>,
) -> Result<Json<Value>> {
    let boundary = LoadBoundary::new();
    let user = boundary
        .run(state.sessions.require(token.as_ref()))
        .await?
        .map_err(|_| WebError::InvalidResetLink)?;
    form.validate()?;

    boundary
        .run(state.auth.update_password(&user.token, &form.password))
        .await?
        .or_fail("Failed to reset password")?;

    Ok(Json(json!({
        "message": "Your password has been successfully reset."
    })))
}

async fn sign_out(State(state): State<AppState>, token: BearerToken) -> Result<Json<Value>> {
    if let Some(token) = token.as_ref() {
        state.auth.sign_out(token).await.or_fail("Failed to sign out")?;
    }
    Ok(Json(json!({
        "message": "You have been signed out successfully."
    })))
}

async fn current_session(State(state): State<AppState>, token: BearerToken) -> Result<Json<Value>> {
    let boundary = LoadBoundary::new();
    let Some(user) = boundary
        .run(state.sessions.current_session(token.as_ref()))
        .await?
    else {
        return Ok(Json(json!({ "user": null, "role": null })));
    };

    let role = boundary.run(state.role_gate.role_of(&user)).await?;
    Ok(Json(json!({ "user": user.user, "role": role })))
}
