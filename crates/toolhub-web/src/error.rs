use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use toolhub_core::{CollaboratorError, GateError, LoadError, ValidationError};
use tracing::{debug, warn};

pub type Result<T> = std::result::Result<T, WebError>;

#[derive(Error, Debug)]
pub enum WebError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Sign in required")]
    Unauthenticated,

    #[error("This password reset link is invalid or has expired.")]
    InvalidResetLink,

    #[error("You don't have admin permissions.")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    /// A collaborator call failed; `action` is what the user sees
    #[error("{action}")]
    Collaborator {
        action: &'static str,
        #[source]
        source: CollaboratorError,
    },

    #[error("Request abandoned")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<GateError> for WebError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::Unauthenticated => Self::Unauthenticated,
            GateError::Forbidden => Self::Forbidden,
        }
    }
}

impl From<LoadError> for WebError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Cancelled => Self::Cancelled,
        }
    }
}

/// Attach the user-facing action message to a collaborator failure
pub trait ResultExt<T> {
    fn or_fail(self, action: &'static str) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, CollaboratorError> {
    fn or_fail(self, action: &'static str) -> Result<T> {
        self.map_err(|source| WebError::Collaborator { action, source })
    }
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated | Self::InvalidResetLink => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Collaborator {
                source: CollaboratorError::Unauthorized(_),
                ..
            } => StatusCode::UNAUTHORIZED,
            Self::Collaborator {
                source: CollaboratorError::Conflict(_),
                ..
            } => StatusCode::CONFLICT,
            Self::Collaborator { .. } => StatusCode::BAD_GATEWAY,
            Self::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            Self::Config(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Collaborator { action, source } => warn!("{}: {}", action, source),
            Self::Cancelled => debug!("Request abandoned before completion"),
            other if status.is_server_error() => warn!("{}", other),
            _ => {}
        }

        let mut body = json!({ "error": self.to_string() });
        if let Self::Validation(err) = &self {
            body["field"] = json!(err.field);
        }
        (status, Json(body)).into_response()
    }
}
